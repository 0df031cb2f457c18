use serde::Deserialize;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Merge vertically adjacent wall faces of the same block into one quad.
    #[default]
    Greedy,
    /// One quad per visible block face.
    PerBlock,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MeshingConfig {
    /// Blocks below this height are skipped.
    pub y_min: usize,
    pub merge: MergePolicy,
}
