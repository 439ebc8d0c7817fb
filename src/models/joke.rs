//! Joke and joke identifier data structures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::hash::content_digest;

/// Content-addressed identifier of a joke.
///
/// Derived from the joke text alone, so it is stable across restarts and
/// can be persisted as a rating key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JokeId(String);

impl JokeId {
    /// Compute the identifier of a joke text.
    pub fn of(text: &str) -> Self {
        Self(content_digest(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JokeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for JokeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for JokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalogued joke.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Joke {
    pub id: JokeId,
    pub text: String,
}

impl Joke {
    /// Wrap a text, computing its identifier.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: JokeId::of(&text),
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joke_id_matches_text() {
        let joke = Joke::new("Штирлиц шёл по коридору и думал о вечном.");
        assert_eq!(joke.id, JokeId::of(&joke.text));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = JokeId::from("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
        assert_eq!(id.to_string(), "abc123");
    }
}
