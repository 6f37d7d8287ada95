use std::fmt;

/// Opaque cache entry identifier, namespaced as `"<context>.<entity>-<id>"`.
///
/// Keys are stable for the lifetime of the entity they address; two distinct
/// logical entities never share a key within one cache instance.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(context: &str, entity: &str, id: impl fmt::Display) -> Self {
        Self(format!("{context}.{entity}-{id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
