//! String-keyed option bag shared by every agent.
//!
//! Agents are configured with whitespace-separated `key=value` pairs
//! (`"name=mcts role=black N=1000 seed=7"`). Recognized keys are
//! enumerated per agent; unknown keys are retained but ignored.

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Characters that are not allowed in agent names (log framing reserves them).
pub const RESERVED_NAME_CHARS: &str = "[]():;";

#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("invalid name: {name:?}")]
    InvalidName { name: String },
    #[error("invalid role: {role:?}")]
    InvalidRole { role: String },
}

/// Parsed `key=value` bag. Later pairs override earlier ones, so defaults
/// are listed first and user arguments win.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    map: FxHashMap<String, String>,
}

impl Properties {
    /// Parse `defaults` then `args`, both whitespace-separated `key=value`
    /// lists. A token without `=` becomes a key with an empty value.
    pub fn parse(defaults: &str, args: &str) -> Self {
        let mut map = FxHashMap::default();
        for token in defaults.split_whitespace().chain(args.split_whitespace()) {
            match token.split_once('=') {
                Some((k, v)) => map.insert(k.to_string(), v.to_string()),
                None => map.insert(token.to_string(), String::new()),
            };
        }
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Parse the value under `key`. Absent or unparsable values yield `None`.
    pub fn get_parsed<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Update one `key=value` pair after construction.
    pub fn notify(&mut self, msg: &str) {
        match msg.split_once('=') {
            Some((k, v)) => self.map.insert(k.to_string(), v.to_string()),
            None => self.map.insert(msg.to_string(), String::new()),
        };
    }

    pub fn name(&self) -> &str {
        self.get("name").unwrap_or("unknown")
    }

    pub fn role(&self) -> &str {
        self.get("role").unwrap_or("unknown")
    }

    /// Names containing reserved punctuation or whitespace break the log
    /// line format and are rejected at construction.
    pub fn validate_name(&self) -> Result<(), PropertyError> {
        let name = self.name();
        if name
            .chars()
            .any(|c| c.is_whitespace() || RESERVED_NAME_CHARS.contains(c))
        {
            return Err(PropertyError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
