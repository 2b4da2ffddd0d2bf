use std::time::Duration;

/// Default quiet period before an autosave fires
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

/// Default maximum age of a restorable draft
pub const DEFAULT_STALENESS: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistenceConfig {
    /// Quiet period after the last edit before writing a draft
    pub debounce: Duration,

    /// Drafts at least this old are discarded instead of restored
    pub staleness: Duration,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            staleness: DEFAULT_STALENESS,
        }
    }
}

impl PersistenceConfig {
    pub fn from_millis(debounce_ms: u64, staleness_hours: u64) -> Self {
        Self {
            debounce: Duration::from_millis(debounce_ms),
            staleness: Duration::from_secs(staleness_hours * 60 * 60),
        }
    }
}
