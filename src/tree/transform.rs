use crate::node::{Children, NodeId, Quadrant, Rect};

/// Lays children out inside a parent whose upper left corner is `(x, y)`,
/// given the size each child should end up with.
///
/// The western column is as wide as whichever western child exists, and
/// the northern row as tall as whichever northern child exists. A missing
/// column or row takes no space, which is what lets one-pixel strips sit in
/// any pair of slots after a transform.
fn place_children(x: u32, y: u32, sizes: [Option<(u32, u32)>; 4]) -> [Option<Rect>; 4] {
	let [nw, ne, sw, _] = sizes;
	let west = nw.or(sw).map_or(0, |s| s.0);
	let north = nw.or(ne).map_or(0, |s| s.1);
	let origins = [(x, y), (x + west, y), (x, y + north), (x + west, y + north)];
	let mut rects = [None; 4];
	for ind in 0..4 {
		rects[ind] = sizes[ind].map(|(w, h)| Rect::from_origin_size(origins[ind].0, origins[ind].1, w, h));
	}
	rects
}

impl super::QTree {
	/// Mirrors the tree across its vertical center line.
	///
	/// Western and eastern children trade places at every level and are
	/// repositioned left to right; sizes and colors don't change. Applying
	/// this twice restores the original tree exactly.
	///
	/// Afterwards a one-pixel-wide column may hang off the eastern slots
	/// instead of the western ones.
	pub fn flip_horizontal(&mut self) {
		self.transform(|children| {
			children.swap(Quadrant::NorthWest, Quadrant::NorthEast);
			children.swap(Quadrant::SouthWest, Quadrant::SouthEast);
		}, |rect| (rect.width(), rect.height()));
		tracing::debug!(width = self.width, height = self.height, "flipped quadtree");
	}

	/// Rotates the tree by 90 degrees counter-clockwise, swapping its width
	/// and height.
	///
	/// Every quadrant moves one position counter-clockwise (NW to SW, SW to
	/// SE, SE to NE, NE to NW) and every subtree is transposed. Four
	/// rotations restore the original tree exactly.
	pub fn rotate_ccw(&mut self) {
		if let Some(root) = self.root {
			let rect = self.nodes[root.index()].rect;
			self.node_mut(root).rect = Rect::from_origin_size(
				rect.upper_left.y,
				rect.upper_left.x,
				rect.height(),
				rect.width(),
			);
		}
		self.transform(|children| {
			let old = *children;
			children.set(Quadrant::NorthWest, old.get(Quadrant::NorthEast));
			children.set(Quadrant::NorthEast, old.get(Quadrant::SouthEast));
			children.set(Quadrant::SouthEast, old.get(Quadrant::SouthWest));
			children.set(Quadrant::SouthWest, old.get(Quadrant::NorthWest));
		}, |rect| (rect.height(), rect.width()));
		std::mem::swap(&mut self.width, &mut self.height);
		tracing::debug!(width = self.width, height = self.height, "rotated quadtree");
	}

	/// Walks the tree top-down. At each branch, `permute` reassigns the
	/// children to new quadrants, then each child is given the size
	/// `resize` derives from its old rectangle and is laid out inside the
	/// branch's already updated rectangle.
	fn transform<P, S>(&mut self, permute: P, resize: S)
	where
		P: Fn(&mut Children),
		S: Fn(&Rect) -> (u32, u32),
	{
		let mut stack: Vec<NodeId> = self.root.into_iter().collect();
		while let Some(id) = stack.pop() {
			let origin = self.nodes[id.index()].rect.upper_left;
			let children = match self.node_mut(id).children_mut() {
				Some(children) => {
					permute(children);
					*children
				},
				None => continue,
			};

			let mut sizes = [None; 4];
			for (ind, quadrant) in Quadrant::ALL.iter().enumerate() {
				sizes[ind] = children.get(*quadrant)
					.map(|c| resize(&self.nodes[c.index()].rect));
			}
			let rects = place_children(origin.x, origin.y, sizes);
			for (quadrant, rect) in Quadrant::ALL.iter().zip(rects.iter()) {
				if let (Some(child), Some(rect)) = (children.get(*quadrant), rect) {
					self.node_mut(child).rect = *rect;
					stack.push(child);
				}
			}
		}
	}
}
