use async_trait::async_trait;
use parking_lot::RwLock;
use shared::{Error, Result};
use std::collections::HashMap;

/// Flags consulted by the application layer.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum FlagKey {
    RequestCoalescing,
    TrendingCarousel,
    PersonBiography,
}

impl FlagKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagKey::RequestCoalescing => "request-coalescing",
            FlagKey::TrendingCarousel => "trending-carousel",
            FlagKey::PersonBiography => "person-biography",
        }
    }
}

/// Capability returning boolean flag values, synchronously, after an async
/// `start` call. Lookups before `start` completes fail with `Unknown` rather
/// than silently reporting `false`.
#[async_trait]
pub trait FeatureFlagProviding: Send + Sync {
    async fn start(&self, flags: HashMap<String, bool>) -> Result<()>;

    fn is_enabled(&self, key: &str) -> Result<bool>;

    fn flag(&self, key: FlagKey) -> Result<bool> {
        self.is_enabled(key.as_str())
    }
}

/// In-memory provider seeded once at startup. Keys absent from the seeded
/// set read as disabled.
#[derive(Default)]
pub struct InMemoryFlagProvider {
    flags: RwLock<Option<HashMap<String, bool>>>,
}

impl InMemoryFlagProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeatureFlagProviding for InMemoryFlagProvider {
    async fn start(&self, flags: HashMap<String, bool>) -> Result<()> {
        *self.flags.write() = Some(flags);
        Ok(())
    }

    fn is_enabled(&self, key: &str) -> Result<bool> {
        let flags = self.flags.read();
        let flags = flags
            .as_ref()
            .ok_or_else(|| Error::Unknown("feature flag provider not started".to_string()))?;
        Ok(flags.get(key).copied().unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookup_before_start_is_an_error_not_false() {
        let provider = InMemoryFlagProvider::new();

        let error = provider.flag(FlagKey::TrendingCarousel).unwrap_err();

        assert!(matches!(error, Error::Unknown(_)));
    }

    #[tokio::test]
    async fn started_provider_serves_seeded_values() {
        let provider = InMemoryFlagProvider::new();
        provider
            .start(HashMap::from([
                ("trending-carousel".to_string(), true),
                ("person-biography".to_string(), false),
            ]))
            .await
            .unwrap();

        assert!(provider.flag(FlagKey::TrendingCarousel).unwrap());
        assert!(!provider.flag(FlagKey::PersonBiography).unwrap());
    }

    #[tokio::test]
    async fn unseeded_keys_read_as_disabled_after_start() {
        let provider = InMemoryFlagProvider::new();
        provider.start(HashMap::new()).await.unwrap();

        assert!(!provider.flag(FlagKey::RequestCoalescing).unwrap());
    }
}
