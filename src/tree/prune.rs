use crate::node::color::{color_distance, Color};
use crate::node::error::PruneError;
use crate::node::{NodeId, NodeKind};

/// Node and leaf counts on either side of a prune.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PruneStats {
	pub nodes_before: usize,
	pub leaves_before: usize,
	pub nodes_after: usize,
	pub leaves_after: usize,
}

impl super::QTree {
	/// Collapses subtrees as high in the tree as possible.
	///
	/// A subtree becomes a single leaf, keeping its root's average color,
	/// when every leaf below it is within `tolerance` (see
	/// [`color_distance`]) of that average. Colors are never recomputed.
	///
	/// A tree can only be pruned once: a second call, or a call on a copy of
	/// a pruned tree, returns [`PruneError::AlreadyPruned`] and leaves the
	/// tree alone. Negative or NaN tolerances are rejected rather than
	/// clamped.
	pub fn prune(&mut self, tolerance: f64) -> Result<PruneStats, PruneError> {
		if !(tolerance >= 0.) {
			return Err(PruneError::InvalidTolerance(tolerance));
		}
		if self.pruned {
			return Err(PruneError::AlreadyPruned);
		}
		let mut stats = PruneStats {
			nodes_before: self.node_count(),
			leaves_before: self.leaf_count(),
			..Default::default()
		};

		// Subtrees are only inspected before anything below them changes,
		// so the criterion always sees the original leaves.
		let mut stack: Vec<NodeId> = self.root.into_iter().collect();
		while let Some(id) = stack.pop() {
			let node = &self.nodes[id.index()];
			let (average, children) = match &node.kind {
				NodeKind::Leaf { .. } => continue,
				NodeKind::Branch { average, children } => (*average, *children),
			};
			if self.leaves_within(id, &average, tolerance) {
				tracing::trace!(node = id.0, "collapsing subtree");
				self.node_mut(id).kind = NodeKind::Leaf { color: average };
			} else {
				stack.extend(children.iter());
			}
		}

		self.compact();
		self.pruned = true;
		stats.nodes_after = self.node_count();
		stats.leaves_after = self.leaf_count();
		tracing::debug!(
			tolerance,
			nodes = stats.nodes_after,
			leaves = stats.leaves_after,
			"pruned quadtree"
		);
		Ok(stats)
	}

	/// Whether every leaf under `id` is within `tolerance` of `center`.
	fn leaves_within(&self, id: NodeId, center: &Color, tolerance: f64) -> bool {
		let mut stack = vec![id];
		while let Some(id) = stack.pop() {
			match &self.nodes[id.index()].kind {
				NodeKind::Leaf { color } => if color_distance(center, color) > tolerance {
					return false;
				},
				NodeKind::Branch { children, .. } => stack.extend(children.iter()),
			}
		}
		true
	}
}
