//! Table sizing knobs shared by `Map` and `Set`.

/// Load factor at which tables grow unless configured otherwise.
pub const DEFAULT_THRESHOLD: f32 = 0.75;

/// Initial slot count and growth threshold for a table.
///
/// ```
/// use chain_hashmap::{Map, MapConfig};
///
/// let cfg = MapConfig::default().initial_size(11).threshold(0.5);
/// let m: Map<u32, &str> = Map::with_config(cfg);
/// assert_eq!(m.size(), 11);
/// assert_eq!(m.threshold(), 0.5);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MapConfig {
    pub(crate) initial_size: usize,
    pub(crate) threshold: f32,
}

impl MapConfig {
    pub fn new(initial_size: usize, threshold: f32) -> Self {
        Self {
            initial_size,
            threshold,
        }
    }

    /// Slots allocated up front. Zero defers allocation to the first insert.
    pub fn initial_size(mut self, n: usize) -> Self {
        self.initial_size = n;
        self
    }

    /// Load factor (`len / size`) that triggers growth. Values above 1 are
    /// allowed and let chains grow longer before a resize.
    pub fn threshold(mut self, t: f32) -> Self {
        self.threshold = t;
        self
    }

    pub(crate) fn validate(&self) {
        assert!(
            self.threshold.is_finite() && self.threshold > 0.0,
            "threshold must be positive and finite, got {}",
            self.threshold
        );
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new(0, DEFAULT_THRESHOLD)
    }
}
