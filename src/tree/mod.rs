pub mod build;
pub mod prune;
pub mod render;
pub mod transform;

use bitvec::order::Msb0;
use bitvec::vec::BitVec;

use crate::node::{Node, NodeId, NodeKind};

/// A `BitVec` marking which arena slots are still reachable from the root.
type LiveNodeBitVec = BitVec<Msb0, u8>;

/// Quadtree decomposition of an image.
///
/// Nodes live in an arena owned by the tree and refer to their children by
/// [`NodeId`]. Every child has a larger id than its parent; the builder
/// allocates top-down, transforms never move nodes between slots, and
/// compaction keeps relative order.
#[derive(Debug, Default, PartialEq)]
pub struct QTree {
	nodes: Vec<Node>,
	root: Option<NodeId>,
	width: u32,
	height: u32,
	/// Set once `prune` has run on this tree or the tree it was copied from.
	pruned: bool,
}

impl Clone for QTree {
	fn clone(&self) -> Self {
		QTree {
			nodes: self.nodes.clone(),
			root: self.root,
			width: self.width,
			height: self.height,
			pruned: self.pruned,
		}
	}

	/// Reuses the arena allocation already held by `self`.
	fn clone_from(&mut self, source: &Self) {
		self.nodes.clone_from(&source.nodes);
		self.root = source.root;
		self.width = source.width;
		self.height = source.height;
		self.pruned = source.pruned;
	}
}

impl QTree {
	/// Nominal width of the image the tree renders to.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Nominal height of the image the tree renders to.
	pub fn height(&self) -> u32 {
		self.height
	}

	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	pub fn root(&self) -> Option<NodeId> {
		self.root
	}

	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.index())
	}

	pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
		&mut self.nodes[id.index()]
	}

	/// Ids of every node reachable from the root, parents before children.
	pub fn node_ids(&self) -> Vec<NodeId> {
		let mut order = Vec::with_capacity(self.nodes.len());
		let mut stack: Vec<NodeId> = self.root.into_iter().collect();
		while let Some(id) = stack.pop() {
			order.push(id);
			if let Some(children) = self.nodes[id.index()].children() {
				stack.extend(children.iter());
			}
		}
		order
	}

	pub fn node_count(&self) -> usize {
		self.node_ids().len()
	}

	pub fn leaf_count(&self) -> usize {
		self.node_ids().into_iter()
			.filter(|id| self.nodes[id.index()].is_leaf())
			.count()
	}

	/// Releases every node. The tree becomes empty with zero dimensions,
	/// and may be pruned again once rebuilt or copied into.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.root = None;
		self.width = 0;
		self.height = 0;
		self.pruned = false;
	}

	/// Replaces the contents of this tree with an independent duplicate of
	/// `source`.
	///
	/// The previous contents are released first. Copying a tree onto itself
	/// can't be expressed, since `source` would alias `&mut self`.
	pub fn copy_from(&mut self, source: &QTree) {
		self.clear();
		self.clone_from(source);
	}

	/// Drops arena slots no longer reachable from the root, renumbering the
	/// survivors in their original order.
	pub(crate) fn compact(&mut self) {
		let mut live: LiveNodeBitVec = std::iter::repeat(false)
			.take(self.nodes.len())
			.collect();
		for id in self.node_ids() {
			live.set(id.index(), true);
		}

		let mut remap = vec![None; self.nodes.len()];
		let mut kept = 0u32;
		for (ind, slot) in remap.iter_mut().enumerate() {
			if live[ind] {
				*slot = Some(NodeId(kept));
				kept += 1;
			}
		}
		if kept as usize == self.nodes.len() {
			return;
		}

		let old = std::mem::take(&mut self.nodes);
		self.nodes.reserve_exact(kept as usize);
		for (ind, mut node) in old.into_iter().enumerate() {
			if !live[ind] {
				continue;
			}
			if let NodeKind::Branch { children, .. } = &mut node.kind {
				for quadrant in crate::node::Quadrant::ALL.iter() {
					let child = children.get(*quadrant).and_then(|c| remap[c.index()]);
					children.set(*quadrant, child);
				}
			}
			self.nodes.push(node);
		}
		self.root = self.root.and_then(|r| remap[r.index()]);
		tracing::trace!(freed = remap.len() - kept as usize, "compacted node arena");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn gradient(width: u32, height: u32) -> image::RgbaImage {
		image::RgbaImage::from_fn(width, height, |x, y| image::Rgba([x as u8 * 20, y as u8 * 20, 7, 255]))
	}

	#[test]
	fn empty_tree() {
		let tree = QTree::default();
		assert!(tree.is_empty());
		assert_eq!(tree.node_count(), 0);
		assert_eq!(tree.leaf_count(), 0);
	}

	#[test]
	fn counts_cover_every_pixel() {
		let tree = QTree::from_image(&gradient(5, 3)).unwrap();
		assert_eq!(tree.leaf_count(), 15);
		assert!(tree.node_count() > tree.leaf_count());
	}

	#[test]
	fn clear_releases_everything() {
		let mut tree = QTree::from_image(&gradient(4, 4)).unwrap();
		tree.clear();
		assert!(tree.is_empty());
		assert_eq!((tree.width(), tree.height()), (0, 0));
		assert_eq!(tree, QTree::default());
	}

	#[test]
	fn copy_replaces_previous_contents() {
		let source = QTree::from_image(&gradient(3, 6)).unwrap();
		let mut dest = QTree::from_image(&gradient(8, 8)).unwrap();
		dest.copy_from(&source);
		assert_eq!(dest, source);
		assert_eq!((dest.width(), dest.height()), (3, 6));
	}

	#[test]
	fn copy_is_independent() {
		let source = QTree::from_image(&gradient(6, 5)).unwrap();
		let before: image::RgbaImage = source.render(1).unwrap();
		let mut dest = source.clone();
		dest.prune(1.).unwrap();
		dest.flip_horizontal();
		assert_eq!(dest.leaf_count(), 1);
		assert_eq!(source.render::<image::RgbaImage>(1).unwrap(), before);
		assert_eq!(source.leaf_count(), 30);
	}

	#[test]
	fn compact_drops_unreachable_slots() {
		let mut tree = QTree::from_image(&gradient(4, 4)).unwrap();
		let root = tree.root().unwrap();
		let average = tree.node(root).unwrap().color();
		tree.node_mut(root).kind = NodeKind::Leaf { color: average };
		tree.compact();
		assert_eq!(tree.nodes.len(), 1);
		assert_eq!(tree.root(), Some(NodeId(0)));
		assert_eq!(tree.node_count(), 1);
	}
}
