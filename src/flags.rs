//! Header flags understood by [`StdLogger`](crate::StdLogger).
use crate::config::ConfigError;
use serde::Deserialize;
use std::{fmt, ops, str::FromStr};

/// Set of line header options.
///
/// Flags combine with `|`:
/// ```
/// use dbglog::Flags;
/// let flags = Flags::DATE | Flags::SHORT_FILE;
/// assert!(flags.contains(Flags::DATE));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "FlagsRepr")]
pub struct Flags(u32);

impl Flags {
    pub const NONE: Self = Self(0);
    /// Local date, `2009/01/23`.
    pub const DATE: Self = Self(1 << 0);
    /// Local time, `01:23:23`.
    pub const TIME: Self = Self(1 << 1);
    /// Microsecond resolution, `01:23:23.123123`. Implies `TIME`.
    pub const MICROSECONDS: Self = Self(1 << 2);
    /// Full source path and line, `/a/b/c/d.rs:23`.
    pub const LONG_FILE: Self = Self(1 << 3);
    /// Final path component and line, `d.rs:23`. Overrides `LONG_FILE`.
    pub const SHORT_FILE: Self = Self(1 << 4);
    /// Use UTC rather than the local time zone.
    pub const UTC: Self = Self(1 << 5);
    /// Move the prefix from the start of the line to just before the message.
    pub const MSG_PREFIX: Self = Self(1 << 6);
    pub const STD: Self = Self(Self::DATE.0 | Self::TIME.0);

    const NAMED: [(&'static str, Flags); 9] = [
        ("date", Self::DATE),
        ("time", Self::TIME),
        ("microseconds", Self::MICROSECONDS),
        ("longfile", Self::LONG_FILE),
        ("shortfile", Self::SHORT_FILE),
        ("utc", Self::UTC),
        ("msgprefix", Self::MSG_PREFIX),
        ("std", Self::STD),
        ("none", Self::NONE),
    ];

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if any flag in `other` is set.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl ops::BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl ops::BitAnd for Flags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl ops::Not for Flags {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl FromStr for Flags {
    type Err = ConfigError;

    /// Parses `date|time|shortfile` style names, or a plain integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(bits) = s.parse::<u32>() {
            return Ok(Self(bits));
        }

        let mut flags = Self::NONE;
        for name in s
            .split(|c: char| c == '|' || c == ',' || c.is_whitespace())
            .filter(|n| !n.is_empty())
        {
            let (_, flag) = Self::NAMED
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .ok_or_else(|| ConfigError::UnknownFlag(name.to_owned()))?;
            flags |= *flag;
        }
        Ok(flags)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        // skip the `std` alias & `none`, print the single bits
        for (name, flag) in &Self::NAMED[..7] {
            if self.contains(*flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagsRepr {
    Bits(u32),
    Names(String),
}

impl TryFrom<FlagsRepr> for Flags {
    type Error = ConfigError;

    fn try_from(repr: FlagsRepr) -> Result<Self, Self::Error> {
        match repr {
            FlagsRepr::Bits(bits) => Ok(Self(bits)),
            FlagsRepr::Names(names) => names.parse(),
        }
    }
}
