//! Tuning knobs for index construction.

/// Parameters shared by the spatial index and the provider that builds it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndexConfig {
    /// Entries a leaf holds before it subdivides.
    pub capacity: usize,

    /// Deepest level a leaf may subdivide to. A leaf at this depth keeps
    /// accepting entries past `capacity`, which bounds the tree when many
    /// entries share (nearly) the same coordinates.
    pub max_depth: usize,

    /// Margin in planar units added on every side of the data extents when
    /// the provider sizes the root region.
    pub padding: f64,
}

impl IndexConfig {
    pub const DEFAULT_CAPACITY: usize = 4;
    pub const DEFAULT_MAX_DEPTH: usize = 32;
    pub const DEFAULT_PADDING: f64 = 0.5;

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            padding: Self::DEFAULT_PADDING,
        }
    }
}
