use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$SPENDWISE_HOME`, or `~/.spendwise` when unset.
pub fn spendwise_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("SPENDWISE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendwise"))
}

pub fn ensure_spendwise_home() -> Result<PathBuf> {
    let dir = spendwise_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_spendwise_home()?.join("config.toml"))
}

pub fn ledger_path() -> Result<PathBuf> {
    Ok(ensure_spendwise_home()?.join("ledger.json"))
}
