//! Category lexicon: canonical categories in declaration order, each with its
//! keyword/phrase cues, plus the derived cue → category reverse index.
//!
//! A lexicon is validated once when it is built and never mutated afterwards.
//! Declaration order is significant: it decides score ties and fuzzy ties.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::warn;

use crate::text::normalize;

const BUILTIN: &[(&str, &[&str])] = &[
    ("Groceries", &["grocery", "supermarket", "mart", "bigbasket", "grocer", "store"]),
    ("Transport", &["uber", "ola", "taxi", "bus", "metro", "fuel", "petrol", "ride"]),
    ("Rent", &["rent", "landlord"]),
    ("Utilities", &["electricity", "water", "internet", "wifi", "phone", "bill"]),
    ("Dining", &["restaurant", "cafe", "dinner", "lunch", "food", "pizza", "burger"]),
    ("Entertainment", &["netflix", "movie", "spotify", "concert", "play"]),
    ("Salary", &["salary", "payroll", "income", "pay"]),
    ("Health", &["hospital", "clinic", "doctor", "pharmacy", "medicine"]),
    ("Shopping", &["amazon", "flipkart", "purchase", "order", "shop"]),
    ("Travel", &["flight", "hotel", "booking", "airbnb", "train"]),
];

/// Problems found while building a lexicon. These are configuration errors and
/// surface at startup, never during categorization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexiconError {
    #[error("lexicon has no categories")]
    Empty,
    #[error("lexicon contains a category with an empty name")]
    EmptyCategory,
    #[error("category {category:?} is declared more than once")]
    DuplicateCategory { category: String },
    #[error("category {category:?} has an empty cue")]
    EmptyCue { category: String },
    #[error("category {category:?} lists cue {cue:?} more than once")]
    DuplicateCue { category: String, cue: String },
    #[error("cue {cue:?} in category {category:?} is not normalized (expected {expected:?})")]
    UnnormalizedCue {
        category: String,
        cue: String,
        expected: String,
    },
}

/// One declared category and its cues, as written in a lexicon file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub name: String,
    pub cues: Vec<String>,
}

/// On-disk lexicon layout:
///
/// ```toml
/// [[category]]
/// name = "Groceries"
/// cues = ["grocery", "supermarket"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconFile {
    #[serde(rename = "category")]
    pub categories: Vec<LexiconEntry>,
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    /// Every (cue, category index) pair, in declaration order.
    all_cues: Vec<(String, usize)>,
    /// Cue → owning category index. Last declaration wins.
    reverse: HashMap<String, usize>,
}

impl Lexicon {
    /// Validate `entries` and derive the flattened cue list and reverse index.
    pub fn from_entries(entries: Vec<LexiconEntry>) -> Result<Self, LexiconError> {
        if entries.is_empty() {
            return Err(LexiconError::Empty);
        }

        let mut names = HashSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(LexiconError::EmptyCategory);
            }
            if !names.insert(entry.name.as_str()) {
                return Err(LexiconError::DuplicateCategory {
                    category: entry.name.clone(),
                });
            }

            let mut seen = HashSet::new();
            for cue in &entry.cues {
                if cue.is_empty() {
                    return Err(LexiconError::EmptyCue {
                        category: entry.name.clone(),
                    });
                }
                let expected = normalize(cue);
                if expected.is_empty() {
                    return Err(LexiconError::EmptyCue {
                        category: entry.name.clone(),
                    });
                }
                if expected != *cue {
                    return Err(LexiconError::UnnormalizedCue {
                        category: entry.name.clone(),
                        cue: cue.clone(),
                        expected,
                    });
                }
                if !seen.insert(cue.as_str()) {
                    return Err(LexiconError::DuplicateCue {
                        category: entry.name.clone(),
                        cue: cue.clone(),
                    });
                }
            }
        }

        let mut all_cues = Vec::new();
        let mut reverse = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            for cue in &entry.cues {
                all_cues.push((cue.clone(), idx));
                if let Some(prev) = reverse.insert(cue.clone(), idx) {
                    warn!(
                        cue = %cue,
                        previous = %entries[prev].name,
                        category = %entry.name,
                        "cue declared under two categories; reverse lookup uses the later one"
                    );
                }
            }
        }

        Ok(Self {
            entries,
            all_cues,
            reverse,
        })
    }

    /// The built-in lexicon shipped with the binary.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(name, cues)| LexiconEntry {
                name: (*name).to_string(),
                cues: cues.iter().map(|c| (*c).to_string()).collect(),
            })
            .collect();
        // Static data; covered by test_builtin_is_valid.
        Self::from_entries(entries).expect("built-in lexicon is valid")
    }

    /// Category names in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.entries[idx].name
    }

    pub fn cues_at(&self, idx: usize) -> &[String] {
        &self.entries[idx].cues
    }

    pub fn cues_for(&self, category: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.name == category)
            .map(|e| e.cues.as_slice())
    }

    pub fn all_cues(&self) -> &[(String, usize)] {
        &self.all_cues
    }

    /// Index of the category that owns `cue` for reverse lookup.
    pub fn owner_of(&self, cue: &str) -> Option<usize> {
        self.reverse.get(cue).copied()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}
