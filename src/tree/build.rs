use crate::node::color::weighted_average;
use crate::node::error::BuildError;
use crate::node::raster::Raster;
use crate::node::{Children, Node, NodeId, NodeKind, Quadrant, Rect};

/// Splits `rect` into the quadrants its children should cover.
///
/// On odd sizes the extra column goes west and the extra row goes north.
/// One-pixel-tall rectangles only get the northern pair, one-pixel-wide
/// rectangles only the western pair, and a single pixel gets nothing.
fn split(rect: Rect) -> [Option<Rect>; 4] {
	let (x, y) = (rect.upper_left.x, rect.upper_left.y);
	let (width, height) = (rect.width(), rect.height());
	let (west, north) = (width - width / 2, height - height / 2);
	let (east, south) = (width - west, height - north);
	match (width, height) {
		(1, 1) => [None; 4],
		(_, 1) => [
			Some(Rect::from_origin_size(x, y, west, 1)),
			Some(Rect::from_origin_size(x + west, y, east, 1)),
			None,
			None,
		],
		(1, _) => [
			Some(Rect::from_origin_size(x, y, 1, north)),
			None,
			Some(Rect::from_origin_size(x, y + north, 1, south)),
			None,
		],
		_ => [
			Some(Rect::from_origin_size(x, y, west, north)),
			Some(Rect::from_origin_size(x + west, y, east, north)),
			Some(Rect::from_origin_size(x, y + north, west, south)),
			Some(Rect::from_origin_size(x + west, y + north, east, south)),
		],
	}
}

impl super::QTree {
	/// Analyzes an image into a quadtree with one leaf per pixel.
	///
	/// Each branch's color is the area-weighted average of its immediate
	/// children only, so error accumulates towards the root in exchange for
	/// constant work per node.
	///
	/// An image with no pixels gives an empty tree.
	pub fn from_image<I: Raster>(img: &I) -> Result<Self, BuildError> {
		let (width, height) = (img.width(), img.height());
		// A tree over n pixels has fewer than 2n nodes.
		if width as u64 * height as u64 * 2 > u32::MAX as u64 {
			return Err(BuildError::TooLarge { width, height });
		}

		let mut tree = super::QTree { width, height, ..Default::default() };
		if width == 0 || height == 0 {
			return Ok(tree);
		}

		// Allocate top-down, so children always land after their parent
		let root = tree.alloc(Rect::from_origin_size(0, 0, width, height));
		tree.root = Some(root);
		let mut stack = vec![root];
		while let Some(id) = stack.pop() {
			let rect = tree.nodes[id.index()].rect;
			let quads = split(rect);
			if quads.iter().all(Option::is_none) {
				let color = img.get_pixel(rect.upper_left.x, rect.upper_left.y);
				tree.nodes[id.index()].kind = NodeKind::Leaf { color };
				continue;
			}
			let mut children = Children::default();
			for (quadrant, quad) in Quadrant::ALL.iter().zip(quads.iter()) {
				if let Some(quad) = quad {
					let child = tree.alloc(*quad);
					children.set(*quadrant, Some(child));
					stack.push(child);
				}
			}
			if let NodeKind::Branch { children: c, .. } = &mut tree.nodes[id.index()].kind {
				*c = children;
			}
		}

		// Children have larger ids, so walking backwards sees them first
		for ind in (0..tree.nodes.len()).rev() {
			let samples = match tree.nodes[ind].children() {
				Some(children) => children.iter()
					.map(|c| (tree.nodes[c.index()].color(), tree.nodes[c.index()].rect.area()))
					.collect::<Vec<_>>(),
				None => continue,
			};
			if let Some(avg) = weighted_average(&samples) {
				if let NodeKind::Branch { average, .. } = &mut tree.nodes[ind].kind {
					*average = avg;
				}
			}
		}

		tracing::debug!(width, height, nodes = tree.nodes.len(), "built quadtree");
		Ok(tree)
	}

	/// Pushes a placeholder branch covering `rect` onto the arena.
	fn alloc(&mut self, rect: Rect) -> NodeId {
		let id = NodeId(self.nodes.len() as u32);
		self.nodes.push(Node {
			rect,
			kind: NodeKind::Branch { average: image::Rgba([0; 4]), children: Children::default() },
		});
		id
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::node::color::Color;
	use crate::tree::QTree;

	/// Reports a size but has no pixels behind it.
	struct SizeOnly {
		width: u32,
		height: u32,
	}

	impl Raster for SizeOnly {
		fn width(&self) -> u32 {
			self.width
		}

		fn height(&self) -> u32 {
			self.height
		}

		fn get_pixel(&self, x: u32, y: u32) -> Color {
			panic!("pixel ({}, {}) read from a size-only raster", x, y)
		}
	}

	#[test]
	fn split_odd_square() {
		let quads = split(Rect::from_origin_size(0, 0, 3, 3));
		assert_eq!(quads[0], Some(Rect::from_origin_size(0, 0, 2, 2)));
		assert_eq!(quads[1], Some(Rect::from_origin_size(2, 0, 1, 2)));
		assert_eq!(quads[2], Some(Rect::from_origin_size(0, 2, 2, 1)));
		assert_eq!(quads[3], Some(Rect::from_origin_size(2, 2, 1, 1)));
	}

	#[test]
	fn split_strips() {
		let row = split(Rect::from_origin_size(4, 2, 5, 1));
		assert_eq!(row, [
			Some(Rect::from_origin_size(4, 2, 3, 1)),
			Some(Rect::from_origin_size(7, 2, 2, 1)),
			None,
			None,
		]);
		let column = split(Rect::from_origin_size(0, 0, 1, 2));
		assert_eq!(column, [
			Some(Rect::from_origin_size(0, 0, 1, 1)),
			None,
			Some(Rect::from_origin_size(0, 1, 1, 1)),
			None,
		]);
		assert_eq!(split(Rect::from_origin_size(6, 6, 1, 1)), [None; 4]);
	}

	#[test]
	fn two_by_two_average() {
		let colors = [
			image::Rgba([255, 0, 0, 255]),
			image::Rgba([0, 255, 0, 255]),
			image::Rgba([0, 0, 255, 255]),
			image::Rgba([10, 20, 30, 255]),
		];
		let img = image::RgbaImage::from_fn(2, 2, |x, y| colors[(y * 2 + x) as usize]);
		let tree = QTree::from_image(&img).unwrap();
		let root = tree.node(tree.root().unwrap()).unwrap();
		assert_eq!(root.rect(), Rect::from_origin_size(0, 0, 2, 2));
		// (255 + 10) / 4, (255 + 20) / 4, (255 + 30) / 4
		assert_eq!(root.color(), image::Rgba([66, 68, 71, 255]));
		let children = root.children().unwrap();
		for (quadrant, color) in Quadrant::ALL.iter().zip(colors.iter()) {
			let child = tree.node(children.get(*quadrant).unwrap()).unwrap();
			assert!(child.is_leaf());
			assert_eq!(child.color(), *color);
		}
	}

	#[test]
	fn average_uses_children_not_pixels() {
		// Columns of 0, 0, 255: the west half averages to 0 first.
		let img = image::RgbaImage::from_fn(3, 1, |x, _| image::Rgba([if x == 2 { 255 } else { 0 }, 0, 0, 255]));
		let tree = QTree::from_image(&img).unwrap();
		let root = tree.node(tree.root().unwrap()).unwrap();
		// (0 * 2 + 255 * 1) / 3
		assert_eq!(root.color(), image::Rgba([85, 0, 0, 255]));

		// Red 3 in each corner of a 3x3; the true mean is 12 / 9 = 1
		let img = image::RgbaImage::from_fn(3, 3, |x, y| image::Rgba([if x != 1 && y != 1 { 3 } else { 0 }, 0, 0, 255]));
		let tree = QTree::from_image(&img).unwrap();
		let root = tree.node(tree.root().unwrap()).unwrap();
		// NW 3 / 4 = 0, NE and SW 3 / 2 = 1, SE 3, then (2 + 2 + 3) / 9 = 0
		assert_eq!(root.color(), image::Rgba([0, 0, 0, 255]));
	}

	#[test]
	fn strips_leave_absent_children() {
		let img = image::RgbaImage::from_pixel(1, 5, image::Rgba([9, 9, 9, 9]));
		let tree = QTree::from_image(&img).unwrap();
		for id in tree.node_ids() {
			if let Some(children) = tree.node(id).unwrap().children() {
				assert!(children.get(Quadrant::NorthEast).is_none());
				assert!(children.get(Quadrant::SouthEast).is_none());
			}
		}
		assert_eq!(tree.leaf_count(), 5);
	}

	#[test]
	fn children_follow_parents() {
		let img = image::RgbaImage::from_pixel(7, 5, image::Rgba([1, 2, 3, 4]));
		let tree = QTree::from_image(&img).unwrap();
		for id in tree.node_ids() {
			if let Some(children) = tree.node(id).unwrap().children() {
				assert!(children.iter().all(|c| c > id));
			}
		}
	}

	#[test]
	fn empty_image() {
		let tree = QTree::from_image(&image::RgbaImage::new(0, 4)).unwrap();
		assert!(tree.is_empty());
		assert_eq!((tree.width(), tree.height()), (0, 4));
	}

	#[test]
	fn too_large_rejected_before_reading() {
		let img = SizeOnly { width: 65536, height: 65536 };
		assert_eq!(
			QTree::from_image(&img).unwrap_err(),
			BuildError::TooLarge { width: 65536, height: 65536 }
		);
	}

	#[test]
	fn zero_sized_raster_gives_empty_tree() {
		for &(width, height) in &[(0, 9), (9, 0), (0, 0)] {
			let tree = QTree::from_image(&SizeOnly { width, height }).unwrap();
			assert!(tree.is_empty());
			assert_eq!((tree.width(), tree.height()), (width, height));
			assert_eq!(tree.node_count(), 0);
		}
	}
}
