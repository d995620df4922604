//! Ordered sets and maps backed by self-balancing binary search trees.
//!
//! Every container shares one node engine: nodes live in a per-tree `NodePool` and are addressed
//! by stable `NodeId` handles, rotations relink handles and keep parent links and optional subtree
//! sizes up to date, and a `Balancer` decides when to rotate or recolor. The available schedules
//! are avl trees and four red black variants.
//!
//! # Examples
//!
//! ```
//! use balanced_trees::avl_tree::AvlSet;
//! use balanced_trees::red_black_tree::{LeftLeaningSet, TopDownSet};
//!
//! let mut avl = AvlSet::new();
//! let mut top_down = TopDownSet::new();
//! let mut left_leaning = LeftLeaningSet::new();
//! for key in 0..100 {
//!     avl.insert(key);
//!     top_down.insert(key);
//!     left_leaning.insert(key);
//! }
//!
//! assert!(avl.iter().eq(top_down.iter()));
//! assert!(top_down.iter().eq(left_leaning.iter()));
//! ```

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod entry;
mod map;
mod set;
mod stats;

pub mod avl_tree;
pub mod balancer;
pub mod check;
pub mod config;
pub mod node;
pub mod pool;
pub mod red_black_tree;
pub mod tree;

pub use self::config::{Config, Pooling, Replacement};
pub use self::map::{BalancedMap, BalancedMapIter};
pub use self::set::BalancedSet;
pub use self::stats::Stats;
