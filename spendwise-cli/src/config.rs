use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use spendwise_core::{CanonicalCategories, Categorizer, CategorizerSettings, Lexicon, LexiconFile};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub categorizer: CategorizerSection,
    pub reports: ReportsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorizerSection {
    #[serde(flatten)]
    pub settings: CategorizerSettings,
    /// TOML lexicon replacing the built-in one (`[[category]]` tables)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportsSection {
    /// IANA zone used to decide what "today" is
    pub timezone: String,
    pub default_days: i64,
    pub default_months: u32,
}

impl Default for ReportsSection {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            default_days: 30,
            default_months: 12,
        }
    }
}

impl ReportsSection {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("invalid timezone {:?}: {}", self.timezone, e))
    }

    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.tz()?).date_naive())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

pub fn load_lexicon(path: &Path) -> Result<Lexicon> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let file: LexiconFile =
        toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    Lexicon::from_entries(file.categories)
        .with_context(|| format!("invalid lexicon {}", path.display()))
}

/// Build the categorizer once at startup. A bad lexicon file stops here.
pub fn build_categorizer(cfg: &Config) -> Result<Categorizer> {
    let lexicon = match &cfg.categorizer.lexicon_path {
        Some(path) => load_lexicon(path)?,
        None => Lexicon::builtin(),
    };
    Ok(Categorizer::new(
        lexicon,
        CanonicalCategories::builtin(),
        cfg.categorizer.settings,
    ))
}
