//! Logger settings from JSON or `DBGLOG_*` environment variables.
use crate::{DbgLogger, Flags, StdLogger};
use serde::{Deserialize, Deserializer};
use std::{io::Write, num::ParseIntError};

pub const ENV_DEBUG: &str = "DBGLOG_DEBUG";
pub const ENV_MASK: &str = "DBGLOG_MASK";
pub const ENV_PREFIX: &str = "DBGLOG_PREFIX";
pub const ENV_FLAGS: &str = "DBGLOG_FLAGS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown log flag `{0}`")]
    UnknownFlag(String),
    #[error("invalid debug mask `{value}`: {source}")]
    InvalidMask {
        value: String,
        source: ParseIntError,
    },
    #[error("invalid boolean `{0}`")]
    InvalidBool(String),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Initial state for a [`DbgLogger`].
///
/// ```
/// let config = dbglog::DebugConfig::from_json(
///     r#"{ "enabled": true, "mask": "0b101", "prefix": "app ", "flags": "shortfile" }"#,
/// )
/// .unwrap();
/// assert_eq!(config.mask, 0b101);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugConfig {
    pub enabled: bool,
    #[serde(deserialize_with = "deserialize_mask")]
    pub mask: u64,
    pub prefix: String,
    pub flags: Flags,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mask: 0,
            prefix: String::new(),
            flags: Flags::STD,
        }
    }
}

impl DebugConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Overwrites the fields present in `json`, keeping the rest.
    pub fn merge_json(&mut self, json: &str) -> Result<(), ConfigError> {
        let patch: ConfigPatch = serde_json::from_str(json)?;
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(mask) = patch.mask {
            self.mask = mask;
        }
        if let Some(prefix) = patch.prefix {
            self.prefix = prefix;
        }
        if let Some(flags) = patch.flags {
            self.flags = flags;
        }
        Ok(())
    }

    /// Reads `DBGLOG_DEBUG`, `DBGLOG_MASK`, `DBGLOG_PREFIX` & `DBGLOG_FLAGS`.
    /// Unset variables keep their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) reading variables from `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(v) = var(ENV_DEBUG) {
            config.enabled = parse_bool(&v)?;
        }
        if let Some(v) = var(ENV_MASK) {
            config.mask = parse_mask(&v)?;
        }
        if let Some(v) = var(ENV_PREFIX) {
            config.prefix = v;
        }
        if let Some(v) = var(ENV_FLAGS) {
            config.flags = v.parse()?;
        }
        Ok(config)
    }

    /// Creates a logger writing to `out` in this configured state.
    pub fn build<W: Write>(&self, out: W) -> DbgLogger<StdLogger<W>> {
        let logger = DbgLogger::new(out, self.prefix.clone(), self.flags);
        self.apply(&logger);
        logger
    }

    /// Sets the enable switch and mask of an existing logger.
    pub fn apply<L>(&self, logger: &DbgLogger<L>) {
        if self.enabled {
            logger.enable();
        } else {
            logger.disable();
        }
        logger.set_mask(self.mask);
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    enabled: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_opt_mask")]
    mask: Option<u64>,
    prefix: Option<String>,
    flags: Option<Flags>,
}

/// Parses a mask as decimal, `0x` hex, `0o` octal or `0b` binary.
/// `_` separators are ignored.
pub fn parse_mask(value: &str) -> Result<u64, ConfigError> {
    let digits: String = value.trim().chars().filter(|c| *c != '_').collect();
    let lower = digits.to_ascii_lowercase();
    let parsed = if let Some(hex) = lower.strip_prefix("0x") {
        u64::from_str_radix(hex, 16)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        u64::from_str_radix(oct, 8)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u64::from_str_radix(bin, 2)
    } else {
        lower.parse()
    };
    parsed.map_err(|source| ConfigError::InvalidMask {
        value: value.to_owned(),
        source,
    })
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool(value.to_owned())),
    }
}

fn deserialize_mask<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Mask {
        Bits(u64),
        Text(String),
    }

    match Mask::deserialize(deserializer)? {
        Mask::Bits(bits) => Ok(bits),
        Mask::Text(text) => parse_mask(&text).map_err(serde::de::Error::custom),
    }
}

fn deserialize_opt_mask<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    deserialize_mask(deserializer).map(Some)
}
