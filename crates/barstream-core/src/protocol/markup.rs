//! How the bar should parse a block's text.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Markup language used for a block's `full_text` and `short_text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Markup {
    /// Text is shown verbatim.
    #[default]
    #[serde(rename = "none")]
    NoMarkup,
    /// Pango markup language.
    #[serde(rename = "pango")]
    Pango,
}

impl Markup {
    /// Every variant, in discriminant order.
    pub const ALL: [Self; 2] = [Self::NoMarkup, Self::Pango];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoMarkup => "none",
            Self::Pango => "pango",
        }
    }

    pub(crate) fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl std::fmt::Display for Markup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Markup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::NoMarkup),
            "pango" => Ok(Self::Pango),
            _ => Err(Error::UnknownMarkup(s.to_string())),
        }
    }
}

impl TryFrom<String> for Markup {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<i64> for Markup {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NoMarkup),
            1 => Ok(Self::Pango),
            other => Err(Error::UnknownMarkup(other.to_string())),
        }
    }
}

impl From<Markup> for i64 {
    fn from(value: Markup) -> Self {
        value as Self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_display_roundtrip() {
        for markup in Markup::ALL {
            assert_eq!(markup.to_string().parse::<Markup>().unwrap(), markup);
        }
    }

    #[test]
    fn parse_ignores_ascii_case() {
        assert_eq!("NONE".parse::<Markup>().unwrap(), Markup::NoMarkup);
        assert_eq!("Pango".parse::<Markup>().unwrap(), Markup::Pango);
    }

    #[test]
    fn parse_unknown_names_offending_text() {
        let err = "html".parse::<Markup>().unwrap_err();
        assert_eq!(err.to_string(), "unknown markup: html");
    }

    #[test]
    fn discriminant_out_of_range_is_rejected() {
        assert_eq!(Markup::try_from(1).unwrap(), Markup::Pango);
        assert!(matches!(Markup::try_from(-1), Err(Error::UnknownMarkup(_))));
    }

    #[test]
    fn serde_wire_names() {
        assert_eq!(serde_json::to_string(&Markup::NoMarkup).unwrap(), r#""none""#);
        assert_eq!(serde_json::to_string(&Markup::Pango).unwrap(), r#""pango""#);
        let parsed: Markup = serde_json::from_str(r#""PANGO""#).unwrap();
        assert_eq!(parsed, Markup::Pango);
    }
}
