/// Sequential id generator for template nodes
///
/// Ids have the form `{seed}-{n}`. The counter only moves forward, so an id
/// handed out once is never produced again by the same generator, even after
/// the node carrying it is deleted.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    /// Generator seeded from a random v4 UUID
    ///
    /// A random seed keeps new ids distinct from ids already present in
    /// documents loaded from storage.
    pub fn random() -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        Self::from_seed(uuid[..12].to_string())
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential id
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.count
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("doc");

        assert_eq!(gen.new_id(), "doc-1");
        assert_eq!(gen.new_id(), "doc-2");
        assert_eq!(gen.new_id(), "doc-3");
        assert_eq!(gen.issued(), 3);
    }

    #[test]
    fn test_random_seeds_differ() {
        let a = IdGenerator::random();
        let b = IdGenerator::random();
        assert_ne!(a.seed(), b.seed());
        assert_eq!(a.seed().len(), 12);
    }
}
