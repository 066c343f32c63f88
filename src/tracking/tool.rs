//! Tracked tools and their pose chains

use crate::core::Point3;
use crate::geometry::{extract_tip_world_position, GeometryError, GeometryResult, RigidTransform};

/// A tracked instrument (needle, pointer) and its live pose chain.
///
/// The chain is ordered innermost first: tip-to-tool, tool-to-tracker,
/// tracker-to-reference, and so on up to world. The host overwrites
/// individual links whenever the tracker reports a new pose; the tip
/// position is recomputed from the live chain at every query.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedTool {
    name: String,
    chain: Vec<RigidTransform>,
}

impl TrackedTool {
    pub fn new(name: impl Into<String>, chain: Vec<RigidTransform>) -> Self {
        Self {
            name: name.into(),
            chain,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chain(&self) -> &[RigidTransform] {
        &self.chain
    }

    pub fn chain_len(&self) -> usize {
        self.chain.len()
    }

    /// Replace the whole chain.
    pub fn set_chain(&mut self, chain: Vec<RigidTransform>) {
        self.chain = chain;
    }

    /// Overwrite a single link of the chain.
    pub fn set_transform(&mut self, index: usize, transform: RigidTransform) -> GeometryResult<()> {
        let len = self.chain.len();
        let slot = self
            .chain
            .get_mut(index)
            .ok_or(GeometryError::ChainIndexOutOfRange { index, len })?;
        *slot = transform;
        Ok(())
    }

    /// World position of the tool tip (mm), recomputed from the current
    /// chain. Fails with `EmptyChain` when no transforms are set.
    pub fn tip_world_position(&self) -> GeometryResult<Point3> {
        extract_tip_world_position(&self.chain)
    }
}
