use crate::block::BlockId;
use crc32fast::Hasher;

/// Stable seed for an editor scope (e.g. "draft:new") using CRC32
pub fn scope_seed(scope: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(scope.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential block ID generator for one document lifetime.
///
/// Ids are `<seed>-<n>` with `n` strictly increasing, so an id is never
/// handed out twice even after the block carrying it was deleted.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(scope: &str) -> Self {
        Self {
            seed: scope_seed(scope),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn next_id(&mut self) -> BlockId {
        self.count += 1;
        BlockId::new(format!("{}-{}", self.seed, self.count))
    }

    /// Account for an id that entered the document from elsewhere (restored
    /// draft, fetched record, template). Ids in this generator's format bump
    /// the counter past them.
    pub fn observe(&mut self, id: &BlockId) {
        let n = id
            .as_str()
            .strip_prefix(self.seed.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|n| n.parse::<u64>().ok());

        if let Some(n) = n {
            self.count = self.count.max(n);
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
