//! The action taken for characters the target encoding cannot represent.
//!
//! A [`Fallback`] is a plain value rather than a mutable encoder setting; pass
//! it to [`Encoder::new`](crate::Encoder::new) or use one of the helpers in
//! [`convert`](crate::convert).
//!
//! # Example
//!
//! ```
//! use latin1_fallback::Fallback;
//!
//! let fallback: Fallback = "replace=!".parse().unwrap();
//! assert_eq!(fallback, Fallback::Replace('!'));
//! assert_eq!(fallback.to_string(), "replace=!");
//!
//! assert_eq!("ESCAPE".parse::<Fallback>().unwrap(), Fallback::Escape);
//! assert!("strict".parse::<Fallback>().is_err());
//! ```

use core::fmt;
use core::str::FromStr;

use crate::error::Error;

/// What to emit in place of an unrepresentable or malformed character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fallback {
    /// Substitute the encoding's default replacement (`?` for ISO-8859-1).
    #[default]
    Default,
    /// Substitute the given character.
    Replace(char),
    /// Drop the character.
    Ignore,
    /// Emit the text `U+` followed by the lowercase hex code point.
    Escape,
}

impl Fallback {
    const REPLACE_PREFIX: &'static str = "replace=";

    /// Returns the replacement character, if this fallback substitutes one.
    ///
    /// `default` resolves the [`Fallback::Default`] case.
    pub fn replacement(&self, default: char) -> Option<char> {
        match *self {
            Fallback::Default => Some(default),
            Fallback::Replace(c) => Some(c),
            Fallback::Ignore | Fallback::Escape => None,
        }
    }
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Default => f.write_str("default"),
            Fallback::Replace(c) => write!(f, "{}{}", Self::REPLACE_PREFIX, c),
            Fallback::Ignore => f.write_str("ignore"),
            Fallback::Escape => f.write_str("escape"),
        }
    }
}

impl FromStr for Fallback {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || Error::UnknownFallback {
            name: s.to_string(),
        };

        if let Some(prefix) = s.get(..Self::REPLACE_PREFIX.len()) {
            if prefix.eq_ignore_ascii_case(Self::REPLACE_PREFIX) {
                let mut chars = s[Self::REPLACE_PREFIX.len()..].chars();
                return match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Fallback::Replace(c)),
                    _ => Err(unknown()),
                };
            }
        }

        match s.to_ascii_lowercase().as_str() {
            "default" | "replace" => Ok(Fallback::Default),
            "ignore" => Ok(Fallback::Ignore),
            "escape" => Ok(Fallback::Escape),
            _ => Err(unknown()),
        }
    }
}
