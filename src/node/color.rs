pub type Color = image::Rgba<u8>;
type BigColor = image::Rgba<u64>;

/// Largest possible `color_distance_squared`, between transparent black
/// and opaque white.
const MAX_DISTANCE_SQUARED: f64 = 4. * 255. * 255.;

fn abs_sub(a: u8, b: u8) -> u8 {
	(a as i16 - b as i16).abs() as u8
}

/// Squared length of a four-channel difference, one `u8` per channel.
fn vec4_len_squared(a: u8, b: u8, c: u8, d: u8) -> u32 {
	(a as u32 * a as u32) +
	(b as u32 * b as u32) +
	(c as u32 * c as u32) +
	(d as u32 * d as u32)
}

fn color_distance_squared(a: &Color, b: &Color) -> u32 {
	vec4_len_squared(
		abs_sub(a.0[0], b.0[0]),
		abs_sub(a.0[1], b.0[1]),
		abs_sub(a.0[2], b.0[2]),
		abs_sub(a.0[3], b.0[3]),
	)
}

/// Euclidean distance between two colors over all four channels,
/// normalized so that the result lies in `0.0..=1.0`.
pub fn color_distance(a: &Color, b: &Color) -> f64 {
	(color_distance_squared(a, b) as f64 / MAX_DISTANCE_SQUARED).sqrt()
}

fn color_add_big(a: BigColor, b: BigColor) -> BigColor {
	image::Rgba::<u64>([
		a.0[0] + b.0[0],
		a.0[1] + b.0[1],
		a.0[2] + b.0[2],
		a.0[3] + b.0[3],
	])
}

fn color_mul(a: &Color, b: u64) -> BigColor {
	image::Rgba::<u64>([
		a.0[0] as u64 * b,
		a.0[1] as u64 * b,
		a.0[2] as u64 * b,
		a.0[3] as u64 * b,
	])
}

/// Integer division truncates, so every channel rounds down.
fn color_div(a: BigColor, b: u64) -> Color {
	image::Rgba::<u8>([
		(a.0[0] / b) as u8,
		(a.0[1] / b) as u8,
		(a.0[2] / b) as u8,
		(a.0[3] / b) as u8,
	])
}

/// Area-weighted mean of `(color, area)` pairs, each channel truncated
/// towards zero.
///
/// Returns `None` when the total weight is zero.
pub fn weighted_average(samples: &[(Color, u64)]) -> Option<Color> {
	let total = samples.iter().map(|s| s.1).sum::<u64>();
	if total == 0 {
		return None;
	}
	let sum = samples.iter()
		.map(|(c, area)| color_mul(c, *area))
		.fold(image::Rgba::<u64>([0; 4]), color_add_big);
	Some(color_div(sum, total))
}
