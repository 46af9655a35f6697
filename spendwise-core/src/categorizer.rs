//! Three-tier categorization of a free-text transaction description.
//!
//! 1. exact: phrase/token scoring against every category
//! 2. fuzzy: each token's closest cue at the strict cutoff, majority vote
//! 3. fallback: first token with a cue at the loose cutoff
//!
//! Every input ends in a well-formed result; an empty description is
//! `Uncategorized` at low confidence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

use crate::canonical::{CanonicalCategories, DEFAULT_CANONICAL_CUTOFF, UNCATEGORIZED};
use crate::fuzzy::closest_cue;
use crate::lexicon::Lexicon;
use crate::scorer::{best, score_all};
use crate::text::{normalize, tokenize};

/// Longest suggestion list returned.
pub const MAX_SUGGESTIONS: usize = 5;
/// Exact-tier score at or above which confidence is high.
pub const HIGH_SCORE: u32 = 3;
/// Fuzzy-tier hit count at or above which confidence is medium.
pub const MEDIUM_FUZZY_HITS: usize = 2;

static DEFAULT: LazyLock<Categorizer> = LazyLock::new(Categorizer::builtin);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        };
        f.write_str(s)
    }
}

/// Outcome of one categorization call. Never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizationResult {
    pub category: String,
    pub confidence: Confidence,
    /// Best first, distinct, at most `MAX_SUGGESTIONS`.
    pub suggestions: Vec<String>,
}

impl CategorizationResult {
    pub fn uncategorized() -> Self {
        Self::single(UNCATEGORIZED, Confidence::Low)
    }

    fn single(category: &str, confidence: Confidence) -> Self {
        Self {
            category: category.to_string(),
            confidence,
            suggestions: vec![category.to_string()],
        }
    }
}

/// Similarity cutoffs. Defaults match the shipped lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorizerSettings {
    pub fuzzy_cutoff: f64,
    pub fallback_cutoff: f64,
    pub canonical_cutoff: f64,
}

impl Default for CategorizerSettings {
    fn default() -> Self {
        Self {
            fuzzy_cutoff: 0.78,
            fallback_cutoff: 0.6,
            canonical_cutoff: DEFAULT_CANONICAL_CUTOFF,
        }
    }
}

/// Category chosen for a new transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAssignment {
    /// Canonicalized category to store.
    pub category: String,
    /// Present only when the category was picked by the engine.
    pub auto: Option<CategorizationResult>,
}

#[derive(Debug, Clone)]
pub struct Categorizer {
    lexicon: Lexicon,
    canonical: CanonicalCategories,
    settings: CategorizerSettings,
}

impl Categorizer {
    pub fn new(
        lexicon: Lexicon,
        canonical: CanonicalCategories,
        settings: CategorizerSettings,
    ) -> Self {
        Self {
            lexicon,
            canonical: canonical.with_cutoff(settings.canonical_cutoff),
            settings,
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            Lexicon::builtin(),
            CanonicalCategories::builtin(),
            CategorizerSettings::default(),
        )
    }

    pub fn categorize(&self, description: &str) -> CategorizationResult {
        let normalized = normalize(description);
        let tokens = tokenize(&normalized);
        if tokens.is_empty() {
            return CategorizationResult::uncategorized();
        }

        if let Some(result) = self.exact_tier(&tokens, &normalized) {
            debug!(description, category = %result.category, "exact match");
            return result;
        }
        if let Some(result) = self.fuzzy_tier(&tokens) {
            debug!(description, category = %result.category, "fuzzy match");
            return result;
        }
        let result = self.fallback_tier(&tokens);
        debug!(description, category = %result.category, "fallback");
        result
    }

    fn exact_tier(&self, tokens: &[&str], normalized: &str) -> Option<CategorizationResult> {
        let scores = score_all(&self.lexicon, tokens, normalized);
        let (winner, top) = best(&scores)?;
        if top == 0 {
            return None;
        }

        let mut ranked: Vec<(usize, u32)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, s)| *s > 0)
            .collect();
        // stable: equal scores stay in declaration order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        Some(CategorizationResult {
            category: self.lexicon.name(winner).to_string(),
            confidence: if top >= HIGH_SCORE {
                Confidence::High
            } else {
                Confidence::Medium
            },
            suggestions: self.names(ranked.iter().map(|(idx, _)| *idx)),
        })
    }

    fn fuzzy_tier(&self, tokens: &[&str]) -> Option<CategorizationResult> {
        let hits: Vec<usize> = tokens
            .iter()
            .filter_map(|t| closest_cue(&self.lexicon, t, self.settings.fuzzy_cutoff))
            .filter_map(|cue| self.lexicon.owner_of(cue))
            .collect();
        if hits.is_empty() {
            return None;
        }

        // (category, count) in first-occurrence order
        let mut tally: Vec<(usize, usize)> = Vec::new();
        let (mut winner, mut winner_count) = (hits[0], 0);
        for &cat in &hits {
            let count = match tally.iter_mut().find(|(c, _)| *c == cat) {
                Some(entry) => {
                    entry.1 += 1;
                    entry.1
                }
                None => {
                    tally.push((cat, 1));
                    1
                }
            };
            if count > winner_count {
                winner = cat;
                winner_count = count;
            }
        }
        tally.sort_by(|a, b| b.1.cmp(&a.1));

        Some(CategorizationResult {
            category: self.lexicon.name(winner).to_string(),
            confidence: if winner_count >= MEDIUM_FUZZY_HITS {
                Confidence::Medium
            } else {
                Confidence::Low
            },
            suggestions: self.names(tally.iter().map(|(idx, _)| *idx)),
        })
    }

    fn fallback_tier(&self, tokens: &[&str]) -> CategorizationResult {
        tokens
            .iter()
            .find_map(|t| closest_cue(&self.lexicon, t, self.settings.fallback_cutoff))
            .and_then(|cue| self.lexicon.owner_of(cue))
            .map(|idx| CategorizationResult::single(self.lexicon.name(idx), Confidence::Low))
            .unwrap_or_else(CategorizationResult::uncategorized)
    }

    fn names(&self, indices: impl Iterator<Item = usize>) -> Vec<String> {
        indices
            .take(MAX_SUGGESTIONS)
            .map(|idx| self.lexicon.name(idx).to_string())
            .collect()
    }

    /// Canonicalize any category string (see `CanonicalCategories::normalize`).
    pub fn normalize_category(&self, raw: Option<&str>) -> String {
        self.canonical.normalize(raw)
    }

    /// Pick the category for a new transaction. A non-blank user category
    /// wins and is only canonicalized; otherwise the engine decides.
    pub fn assign(&self, description: &str, user_category: Option<&str>) -> CategoryAssignment {
        match user_category.filter(|c| !c.trim().is_empty()) {
            Some(user) => CategoryAssignment {
                category: self.canonical.normalize(Some(user)),
                auto: None,
            },
            None => {
                let result = self.categorize(description);
                CategoryAssignment {
                    category: self.canonical.normalize(Some(&result.category)),
                    auto: Some(result),
                }
            }
        }
    }

    /// Explicit user override of an existing transaction's category.
    pub fn recategorize(&self, raw: &str) -> String {
        self.canonical.normalize(Some(raw))
    }

    /// Canonical set plus lexicon categories, deduplicated and sorted.
    pub fn list_categories(&self) -> Vec<String> {
        self.canonical
            .names()
            .iter()
            .map(String::as_str)
            .chain(self.lexicon.categories())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Categorize with the built-in lexicon and default settings.
pub fn categorize(description: &str) -> CategorizationResult {
    DEFAULT.categorize(description)
}
