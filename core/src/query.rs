//! Accumulated query parameters for a single request chain.

use std::collections::BTreeMap;
use std::fmt;

/// Query parameters keyed by name. Setting a key twice keeps the last value.
///
/// Backed by an ordered map so built requests are deterministic; the order
/// has no meaning to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.params.insert(key.into(), value.to_string());
    }

    /// Set `key` to the items joined by commas.
    pub fn set_list<I, S>(&mut self, key: &str, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = items
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.params.insert(key.to_string(), joined);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.params.into_iter().collect()
    }
}

/// Key for a filter on `field`, optionally qualified by a condition.
/// An empty condition counts as none.
pub fn filter_key(field: &str, condition: Option<&Condition>) -> String {
    match condition {
        Some(condition) if !condition.as_str().is_empty() => {
            format!("filter[{field}:{condition}]")
        }
        _ => format!("filter[{field}]"),
    }
}

/// Filter condition appended to a field name, as in `filter[title:contains]`.
///
/// Any string converts into a condition, so conditions this enum does not
/// name still reach the server verbatim through `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Is,
    Not,
    Contains,
    DoesntContain,
    In,
    NotIn,
    StartsWith,
    EndsWith,
    Gt,
    Gte,
    Lt,
    Lte,
    Null,
    NotNull,
    Exists,
    DoesntExist,
    Matches,
    Other(String),
}

impl Condition {
    pub fn as_str(&self) -> &str {
        match self {
            Condition::Is => "is",
            Condition::Not => "not",
            Condition::Contains => "contains",
            Condition::DoesntContain => "doesnt_contain",
            Condition::In => "in",
            Condition::NotIn => "not_in",
            Condition::StartsWith => "starts_with",
            Condition::EndsWith => "ends_with",
            Condition::Gt => "gt",
            Condition::Gte => "gte",
            Condition::Lt => "lt",
            Condition::Lte => "lte",
            Condition::Null => "null",
            Condition::NotNull => "not_null",
            Condition::Exists => "exists",
            Condition::DoesntExist => "doesnt_exist",
            Condition::Matches => "matches",
            Condition::Other(name) => name,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Condition {
    fn from(name: &str) -> Self {
        match name {
            "is" => Condition::Is,
            "not" => Condition::Not,
            "contains" => Condition::Contains,
            "doesnt_contain" => Condition::DoesntContain,
            "in" => Condition::In,
            "not_in" => Condition::NotIn,
            "starts_with" => Condition::StartsWith,
            "ends_with" => Condition::EndsWith,
            "gt" => Condition::Gt,
            "gte" => Condition::Gte,
            "lt" => Condition::Lt,
            "lte" => Condition::Lte,
            "null" => Condition::Null,
            "not_null" => Condition::NotNull,
            "exists" => Condition::Exists,
            "doesnt_exist" => Condition::DoesntExist,
            "matches" => Condition::Matches,
            other => Condition::Other(other.to_string()),
        }
    }
}

impl From<String> for Condition {
    fn from(name: String) -> Self {
        Condition::from(name.as_str())
    }
}
