//! Wire value types
//!
//! Browser forms send identifiers, flags and numbers either as JSON
//! scalars or as strings. These types accept both and bind cleanly.

use rusqlite::types::{ToSql, ToSqlOutput};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Identifier that may arrive as an integer or a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl Key {
    /// Interpret a path segment, preferring the integer form
    pub fn from_path(segment: &str) -> Self {
        match segment.parse::<i64>() {
            Ok(i) => Key::Int(i),
            Err(_) => Key::Text(segment.to_string()),
        }
    }

    /// Absent for validation purposes: blank text or the integer 0
    pub(crate) fn is_blank(&self) -> bool {
        match self {
            Key::Int(i) => *i == 0,
            Key::Text(s) => s.trim().is_empty(),
        }
    }
}

impl ToSql for Key {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Key::Int(i) => Ok(ToSqlOutput::from(*i)),
            Key::Text(s) => Ok(ToSqlOutput::from(s.as_str())),
        }
    }
}

/// Boolean flag stored as 0/1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "FlagRepr", into = "bool")]
pub struct Flag(pub bool);

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<FlagRepr> for Flag {
    fn from(repr: FlagRepr) -> Self {
        Flag(match repr {
            FlagRepr::Bool(b) => b,
            FlagRepr::Int(i) => i != 0,
            FlagRepr::Float(f) => f != 0.0,
            FlagRepr::Text(s) => {
                let s = s.trim();
                !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
            }
        })
    }
}

impl From<Flag> for bool {
    fn from(flag: Flag) -> Self {
        flag.0
    }
}

impl ToSql for Flag {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.0)))
    }
}

/// Deserialize an optional number given as a JSON number or numeric string
///
/// Empty strings read as absent.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberRepr {
        Num(f64),
        Text(String),
    }

    match Option::<NumberRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberRepr::Num(n)) => Ok(Some(n)),
        Some(NumberRepr::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberRepr::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a number, got '{}'", s))),
    }
}

/// Deserialize optional text that forms may send as a bare number,
/// such as postal codes and phone numbers
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextRepr {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<TextRepr>::deserialize(deserializer)?.map(|repr| match repr {
        TextRepr::Text(s) => s,
        TextRepr::Int(i) => i.to_string(),
        TextRepr::Float(f) => f.to_string(),
    }))
}

/// Non-blank text, or `None`
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
