use thiserror::Error;

/// Reason why an image couldn't be turned into a quadtree.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BuildError {
	/// The image has more pixels than node ids can address.
	#[error("image of {width}x{height} is too large to index")]
	TooLarge { width: u32, height: u32 },
}

/// Reason why a quadtree couldn't be rendered to an image buffer.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RenderError {
	/// A scale of zero would produce an empty image.
	#[error("render scale must be at least 1")]
	ZeroScale,
	/// The scaled dimensions don't fit in a `u32`.
	#[error("rendering {width}x{height} at scale {scale} overflows image dimensions")]
	TooLarge { width: u32, height: u32, scale: u32 },
}

/// Reason why a quadtree couldn't be pruned.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PruneError {
	/// The tolerance was negative or NaN.
	#[error("prune tolerance must be a non-negative number, got {0}")]
	InvalidTolerance(f64),
	/// The tree, or the tree it was copied from, has already been pruned.
	#[error("tree has already been pruned")]
	AlreadyPruned,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_tolerance_message_covers_nan() {
		assert_eq!(
			PruneError::InvalidTolerance(f64::NAN).to_string(),
			"prune tolerance must be a non-negative number, got NaN"
		);
		assert_eq!(
			PruneError::InvalidTolerance(-1.5).to_string(),
			"prune tolerance must be a non-negative number, got -1.5"
		);
	}
}
