//! spendwise-core: transaction categorization engine and transaction types

pub mod canonical;
pub mod categorizer;
pub mod fuzzy;
pub mod lexicon;
pub mod scorer;
pub mod text;
pub mod transaction;

pub use canonical::{CanonicalCategories, UNCATEGORIZED};
pub use categorizer::{
    CategorizationResult, Categorizer, CategorizerSettings, CategoryAssignment, Confidence,
    categorize,
};
pub use lexicon::{Lexicon, LexiconEntry, LexiconError, LexiconFile};
pub use transaction::{NewTransaction, Transaction, TransactionKind};
