use termpkg_model::IdentifierStrategy;
use uuid::Uuid;

/// Generates resource `id` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator {
    strategy: IdentifierStrategy,
}

impl IdGenerator {
    pub fn new(strategy: IdentifierStrategy) -> Self {
        Self { strategy }
    }

    /// Identifier for the resource with canonical `url`.
    pub fn id_for(&self, url: &str) -> String {
        match self.strategy {
            IdentifierStrategy::Random => Uuid::new_v4().to_string(),
            IdentifierStrategy::Deterministic => {
                Uuid::new_v5(&Uuid::NAMESPACE_URL, url.as_bytes()).to_string()
            }
        }
    }
}
