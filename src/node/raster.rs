use super::color::Color;

/// Read access to a fully decoded image.
pub trait Raster {
	fn width(&self) -> u32;
	fn height(&self) -> u32;
	/// Color of the pixel at `(x, y)`; callers stay within
	/// `width()` by `height()`.
	fn get_pixel(&self, x: u32, y: u32) -> Color;
}

/// An image that rendering can paint into.
pub trait RasterMut: Raster {
	/// Creates an image of the given size. The initial contents don't
	/// matter, since rendering covers every pixel.
	fn blank(width: u32, height: u32) -> Self where Self: Sized;
	fn set_pixel(&mut self, x: u32, y: u32, color: Color);
}

impl Raster for image::RgbaImage {
	fn width(&self) -> u32 {
		image::ImageBuffer::width(self)
	}

	fn height(&self) -> u32 {
		image::ImageBuffer::height(self)
	}

	fn get_pixel(&self, x: u32, y: u32) -> Color {
		*image::ImageBuffer::get_pixel(self, x, y)
	}
}

impl RasterMut for image::RgbaImage {
	fn blank(width: u32, height: u32) -> Self {
		image::RgbaImage::new(width, height)
	}

	fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
		self.put_pixel(x, y, color);
	}
}
