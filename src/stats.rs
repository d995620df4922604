/// Counters of the restructuring work done by a tree.
///
/// The counters carry no functional meaning; benchmarks read and reset them to compare
/// balancing schedules. A double rotation is also counted as its two single rotations.
///
/// `recolors` counts repair steps that change colors without rotating: color flips, the red
/// uncle case of an insertion and the black sibling case of an erasure. Colors assigned as part
/// of a rotation case, and the final blackening of the root, are not counted.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Stats {
    pub left_rotations: u64,
    pub right_rotations: u64,
    pub double_rotations: u64,
    pub recolors: u64,
}

impl Stats {
    /// Returns the total number of single rotations.
    pub fn rotations(&self) -> u64 {
        self.left_rotations + self.right_rotations
    }
}
