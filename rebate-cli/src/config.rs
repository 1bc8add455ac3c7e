use anyhow::{Context, Result, bail};
use rebate_core::{ConfigError, KeywordSets, RateSchedule};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_config_path, ensure_rebate_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rates: RatesSection,
    pub keywords: KeywordsSection,
}

/// Rates are fractions; values may be written as TOML numbers or strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesSection {
    pub domestic_rate: Decimal,
    pub foreign_rate: Decimal,
    /// Total rate for special merchants, base included.
    pub special_rate: Decimal,
    /// Extra points above base that special merchants may earn per statement.
    pub bonus_cap: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordsSection {
    pub special: Vec<String>,
    pub exclude: Vec<String>,
    pub special_case_insensitive: bool,
    pub exclude_case_insensitive: bool,
}

impl Default for RatesSection {
    fn default() -> Self {
        Self {
            domestic_rate: dec!(0.012),
            foreign_rate: dec!(0.025),
            special_rate: dec!(0.10),
            bonus_cap: dec!(1000),
        }
    }
}

impl Default for KeywordsSection {
    fn default() -> Self {
        Self {
            special: owned(&[
                "App Store", "Google Play", "Garena", "Steam", "Nintendo", "PlayStation",
                "MyCard", "Blizzard", "Xbox", "Ubisoft",
                "YouTube", "Netflix", "Disney", "Spotify", "KKBOX", "Apple TV", "Twitch",
                "Uber", "Foodpanda", "麥當勞", "肯德基", "摩斯", "必勝客", "拿坡里",
                "LINE Pay", "連加", "蝦皮",
            ]),
            exclude: owned(&[
                "年費", "循環息", "預借現金", "滯納金", "手續費", "掛失",
                "繳稅", "燃料費", "中華電信", "台電", "自來水", "全聯", "悠遊卡", "一卡通",
            ]),
            special_case_insensitive: true,
            exclude_case_insensitive: false,
        }
    }
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Config {
    pub fn schedule(&self) -> std::result::Result<RateSchedule, ConfigError> {
        let r = &self.rates;
        RateSchedule::new(r.domestic_rate, r.foreign_rate, r.special_rate, r.bonus_cap)
    }

    pub fn keyword_sets(&self) -> std::result::Result<KeywordSets, ConfigError> {
        let k = &self.keywords;
        KeywordSets::from_patterns(
            &k.exclude,
            k.exclude_case_insensitive,
            &k.special,
            k.special_case_insensitive,
        )
    }
}

/// `explicit` must exist when given; the default location may be absent, in
/// which case built-in defaults apply.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<(PathBuf, bool)> {
    match explicit {
        Some(p) => Ok((p.to_path_buf(), true)),
        None => Ok((default_config_path()?, false)),
    }
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let (p, required) = resolve_config_path(explicit)?;
    if !p.exists() {
        if required {
            bail!("config not found: {}", p.display());
        }
        tracing::debug!(path = %p.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let cfg = parse_config(&s).with_context(|| format!("parse {}", p.display()))?;
    tracing::debug!(path = %p.display(), "loaded config");
    Ok(cfg)
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            ensure_rebate_home()?;
            default_config_path()?
        }
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
