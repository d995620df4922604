//! Construction-time configuration of a balanced set or map.

/// How released node storage is recycled.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Pooling {
    /// There is no free list: released slots are never reused. Trailing vacant slots are
    /// truncated and the whole storage is dropped as soon as the tree drains or is cleared.
    Disabled,
    /// Released slots stay on the free list and are reused by later insertions.
    Lazy,
    /// Like `Lazy`, but the given number of vacant slots is allocated up front.
    Preallocated(usize),
}

impl Default for Pooling {
    fn default() -> Self {
        Pooling::Lazy
    }
}

/// Which node replaces a node with two children when it is erased.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Replacement {
    /// The leftmost node of the right subtree.
    Successor,
    /// The rightmost node of the left subtree.
    Predecessor,
    /// Let the balancer pick the side that needs fewer repairs. Ties go to the successor.
    Preferred,
}

impl Default for Replacement {
    fn default() -> Self {
        Replacement::Preferred
    }
}

/// A struct holding the construction-time options of a tree.
///
/// # Examples
///
/// ```
/// use balanced_trees::{Config, Pooling, Replacement};
///
/// let config = Config::new()
///     .pooling(Pooling::Preallocated(1024))
///     .replacement(Replacement::Successor)
///     .track_size(true);
/// assert_eq!(config.pooling, Pooling::Preallocated(1024));
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Config {
    pub pooling: Pooling,
    pub replacement: Replacement,
    pub track_size: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pooling(mut self, pooling: Pooling) -> Self {
        self.pooling = pooling;
        self
    }

    pub fn replacement(mut self, replacement: Replacement) -> Self {
        self.replacement = replacement;
        self
    }

    pub fn track_size(mut self, track_size: bool) -> Self {
        self.track_size = track_size;
        self
    }
}
