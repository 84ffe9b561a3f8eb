pub mod color;
pub mod error;
pub mod raster;

use color::Color;

/// Position of a pixel in image space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
	pub x: u32,
	pub y: u32,
}

/// Rectangle of pixels with inclusive corners.
///
/// Always at least one pixel wide and one pixel tall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
	pub upper_left: Point,
	pub lower_right: Point,
}

impl Rect {
	/// Rectangle with its upper left corner at `(x, y)`.
	///
	/// `width` and `height` must be nonzero.
	pub fn from_origin_size(x: u32, y: u32, width: u32, height: u32) -> Self {
		debug_assert!(width > 0 && height > 0, "degenerate rectangle");
		Rect {
			upper_left: Point { x, y },
			lower_right: Point { x: x + width - 1, y: y + height - 1 },
		}
	}

	pub fn width(&self) -> u32 {
		self.lower_right.x - self.upper_left.x + 1
	}

	pub fn height(&self) -> u32 {
		self.lower_right.y - self.upper_left.y + 1
	}

	pub fn area(&self) -> u64 {
		self.width() as u64 * self.height() as u64
	}
}

/// One of the four compass quadrants a node can be split into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
	NorthWest,
	NorthEast,
	SouthWest,
	SouthEast,
}

impl Quadrant {
	/// In slot order, which is also the order the builder allocates in.
	pub const ALL: [Quadrant; 4] = [
		Quadrant::NorthWest,
		Quadrant::NorthEast,
		Quadrant::SouthWest,
		Quadrant::SouthEast,
	];

	fn index(self) -> usize {
		match self {
			Quadrant::NorthWest => 0,
			Quadrant::NorthEast => 1,
			Quadrant::SouthWest => 2,
			Quadrant::SouthEast => 3,
		}
	}
}

/// Index of a node in its tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
	pub(crate) fn index(self) -> usize {
		self.0 as usize
	}
}

/// The (up to) four children of a branch node, keyed by quadrant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Children {
	slots: [Option<NodeId>; 4],
}

impl Children {
	pub fn get(&self, quadrant: Quadrant) -> Option<NodeId> {
		self.slots[quadrant.index()]
	}

	pub fn set(&mut self, quadrant: Quadrant, child: Option<NodeId>) {
		self.slots[quadrant.index()] = child;
	}

	/// Exchanges the children in two quadrants.
	pub fn swap(&mut self, a: Quadrant, b: Quadrant) {
		self.slots.swap(a.index(), b.index());
	}

	/// Present children, in quadrant order.
	pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
		self.slots.iter().filter_map(|s| *s)
	}

	pub fn is_empty(&self) -> bool {
		self.slots.iter().all(Option::is_none)
	}
}

/// What a node holds besides its rectangle.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
	/// No children; `color` covers the whole rectangle.
	///
	/// Straight out of the builder a leaf is a single pixel, but pruning
	/// turns whole branches into (larger) leaves.
	Leaf { color: Color },
	/// At least one child. `average` is computed once at build time from the
	/// immediate children and never updated afterwards.
	Branch { average: Color, children: Children },
}

/// Node in a quadtree for storing an image.
///
/// Covers a rectangle of the image and always carries a color, such that
/// tree descent can stop at any level and give a meaningful preview.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub(crate) rect: Rect,
	pub(crate) kind: NodeKind,
}

impl Node {
	pub fn rect(&self) -> Rect {
		self.rect
	}

	pub fn kind(&self) -> &NodeKind {
		&self.kind
	}

	/// The leaf color, or the average color of a branch.
	pub fn color(&self) -> Color {
		match self.kind {
			NodeKind::Leaf { color } => color,
			NodeKind::Branch { average, .. } => average,
		}
	}

	pub fn is_leaf(&self) -> bool {
		matches!(self.kind, NodeKind::Leaf { .. })
	}

	pub fn children(&self) -> Option<&Children> {
		match &self.kind {
			NodeKind::Leaf { .. } => None,
			NodeKind::Branch { children, .. } => Some(children),
		}
	}

	pub(crate) fn children_mut(&mut self) -> Option<&mut Children> {
		match &mut self.kind {
			NodeKind::Leaf { .. } => None,
			NodeKind::Branch { children, .. } => Some(children),
		}
	}
}
