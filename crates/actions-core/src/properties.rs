// CommandProperties: the key-value bag attached to a workflow command,
// rendered deterministically as `key=value,key2=value2`.

use std::collections::HashMap;

use crate::escape::escape_property;
use crate::value::CommandValue;

/// Key-value properties attached to a workflow command.
///
/// Insertion order is irrelevant: rendering sorts the *rendered* `key=value`
/// pair strings lexicographically, so output is deterministic regardless of
/// how the map was built. Note the sort is over whole pairs, not keys, which
/// matters for tie-breaking when one key is a prefix of another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandProperties(HashMap<String, CommandValue>);

impl CommandProperties {
    /// Create an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, replacing any existing value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CommandValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CommandValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&CommandValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Render to the wire form: escaped `key=value` pairs, sorted and joined
    /// with `,`. An empty bag renders to the empty string.
    pub fn render(&self) -> String {
        let mut pairs: Vec<String> = self
            .0
            .iter()
            .map(|(k, v)| format!("{}={}", k, escape_property(&v.to_text())))
            .collect();
        pairs.sort();
        pairs.join(",")
    }
}

impl<K, V> FromIterator<(K, V)> for CommandProperties
where
    K: Into<String>,
    V: Into<CommandValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for CommandProperties
where
    K: Into<String>,
    V: Into<CommandValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
