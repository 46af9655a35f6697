//! JSON-file transaction store under the spendwise home directory.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use spendwise_core::{NewTransaction, Transaction};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub next_id: u64,
    pub transactions: Vec<Transaction>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            next_id: 1,
            transactions: Vec::new(),
        }
    }
}

impl Ledger {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), transactions = self.transactions.len(), "saved ledger");
        Ok(())
    }

    pub fn insert(&mut self, new: NewTransaction) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.transactions.push(Transaction::from_new(id, new));
        id
    }

    pub fn extend(&mut self, news: impl IntoIterator<Item = NewTransaction>) -> usize {
        news.into_iter().map(|n| self.insert(n)).count()
    }

    /// Newest first (by date, then id), at most `limit`.
    pub fn recent(&self, limit: usize) -> Vec<&Transaction> {
        let mut out: Vec<&Transaction> = self.transactions.iter().collect();
        out.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        out.truncate(limit);
        out
    }

    pub fn set_category(&mut self, id: u64, category: String) -> Result<&Transaction> {
        let Some(txn) = self.transactions.iter_mut().find(|t| t.id == id) else {
            bail!("no transaction with id {}", id);
        };
        txn.category = category;
        Ok(txn)
    }
}
