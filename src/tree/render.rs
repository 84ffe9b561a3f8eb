use crate::node::error::RenderError;
use crate::node::raster::RasterMut;

impl super::QTree {
	/// Paints every leaf into a new image `scale` times the tree's size.
	///
	/// Each pixel of a leaf's rectangle becomes a `scale` by `scale` block of
	/// the leaf's color; there is no interpolation. Works the same on pruned,
	/// flipped and rotated trees, since only leaf rectangles matter.
	pub fn render<R: RasterMut>(&self, scale: u32) -> Result<R, RenderError> {
		if scale == 0 {
			return Err(RenderError::ZeroScale);
		}
		let too_large = RenderError::TooLarge { width: self.width, height: self.height, scale };
		let out_width = self.width.checked_mul(scale).ok_or_else(|| too_large.clone())?;
		let out_height = self.height.checked_mul(scale).ok_or(too_large)?;

		let mut img = R::blank(out_width, out_height);
		for id in self.node_ids() {
			let node = &self.nodes[id.index()];
			if !node.is_leaf() {
				continue;
			}
			let (rect, color) = (node.rect, node.color());
			for row in rect.upper_left.y * scale..(rect.lower_right.y + 1) * scale {
				for col in rect.upper_left.x * scale..(rect.lower_right.x + 1) * scale {
					img.set_pixel(col, row, color);
				}
			}
		}
		Ok(img)
	}
}
