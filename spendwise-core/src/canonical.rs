//! Coerces any category string, auto-assigned or typed by a user, onto the
//! fixed user-facing vocabulary.

use crate::fuzzy::closest_match;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Similarity needed for a fuzzy hit against the canonical set.
pub const DEFAULT_CANONICAL_CUTOFF: f64 = 0.75;

const PLACEHOLDERS: &[&str] = &["n/a", "na", "none"];

const BUILTIN: &[&str] = &[
    "Groceries",
    "Transport",
    "Rent",
    "Utilities",
    "Dining",
    "Entertainment",
    "Salary",
    "Health",
    "Shopping",
    "Travel",
    "Education",
    "Insurance",
    "Investments",
    "Gifts",
    "Other",
    UNCATEGORIZED,
];

#[derive(Debug, Clone)]
pub struct CanonicalCategories {
    names: Vec<String>,
    lowered: Vec<String>,
    cutoff: f64,
}

impl CanonicalCategories {
    /// Build from `names`, dropping case-insensitive duplicates (first kept).
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Self {
            names: Vec::new(),
            lowered: Vec::new(),
            cutoff: DEFAULT_CANONICAL_CUTOFF,
        };
        for name in names {
            let name: String = name.into();
            let lower = name.trim().to_lowercase();
            if lower.is_empty() || out.lowered.contains(&lower) {
                continue;
            }
            out.names.push(name.trim().to_string());
            out.lowered.push(lower);
        }
        out
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN.iter().copied())
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Canonical spelling of `name` if it matches case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        let lower = name.trim().to_lowercase();
        self.lowered
            .iter()
            .position(|l| *l == lower)
            .map(|i| self.names[i].as_str())
    }

    /// Map `raw` onto the canonical set:
    /// exact (case-insensitive) → fuzzy → placeholder collapse → pass-through.
    pub fn normalize(&self, raw: Option<&str>) -> String {
        let Some(raw) = raw else {
            return UNCATEGORIZED.to_string();
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return UNCATEGORIZED.to_string();
        }

        if let Some(name) = self.lookup(trimmed) {
            return name.to_string();
        }

        let lower = trimmed.to_lowercase();
        let candidates = self.lowered.iter().map(String::as_str);
        if let Some(hit) = closest_match(&lower, candidates, self.cutoff) {
            if let Some(i) = self.lowered.iter().position(|l| l == hit) {
                return self.names[i].clone();
            }
        }

        if trimmed.chars().count() <= 2 || PLACEHOLDERS.contains(&lower.as_str()) {
            return UNCATEGORIZED.to_string();
        }

        trimmed.to_string()
    }
}

impl Default for CanonicalCategories {
    fn default() -> Self {
        Self::builtin()
    }
}
