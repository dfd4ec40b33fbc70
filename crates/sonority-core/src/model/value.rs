use serde::{Deserialize, Serialize};

/// Cell contents that CSV readers conventionally treat as "no value".
const MISSING_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// A single cell of the song table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Missing,
    Number(f64),
    Text(String),
}

impl Value {
    /// Classify a raw CSV field.
    ///
    /// Surrounding whitespace is ignored. Missing-value tokens map to
    /// [`Value::Missing`], anything `f64` accepts maps to
    /// [`Value::Number`], and the rest is kept verbatim as text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_missing(trimmed) {
            Self::Missing
        } else if let Ok(number) = trimmed.parse::<f64>() {
            Self::Number(number)
        } else {
            Self::Text(raw.to_string())
        }
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the cell as text, the way a title or name column is read.
    ///
    /// Numbers keep their shortest round-trip form so that a numeric
    /// title such as `1999` reads back as written.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

pub(crate) fn is_missing(field: &str) -> bool {
    MISSING_TOKENS.contains(&field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(Value::parse("0.25"), Value::Number(0.25));
        assert_eq!(Value::parse(" -5.1 "), Value::Number(-5.1));
        assert_eq!(Value::parse("120"), Value::Number(120.0));
    }

    #[test]
    fn test_parse_missing_tokens() {
        for token in ["", "  ", "NA", "NaN", "nan", "null", "None"] {
            assert!(Value::parse(token).is_missing(), "{token:?} should be missing");
        }
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(Value::parse("loud"), Value::Text("loud".to_string()));
        assert_eq!(Value::parse("loud").as_f64(), None);
        assert_eq!(Value::parse("loud").as_str(), Some("loud"));
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Value::Number(1999.0).to_text(), Some("1999".to_string()));
        assert_eq!(Value::Missing.to_text(), None);
    }
}
