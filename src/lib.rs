//! Quadtree representation of raster images.
//!
//! A [`QTree`] is built once from a [`Raster`](node::raster::Raster) and
//! can then be rendered back at any integer scale, lossily pruned, mirrored
//! and rotated without going back to the source pixels:
//!
//! ```
//! use qtree_img::QTree;
//!
//! let img = image::RgbaImage::from_fn(5, 3, |x, y| image::Rgba([x as u8 * 50, y as u8 * 80, 0, 255]));
//! let mut tree = QTree::from_image(&img).unwrap();
//! tree.rotate_ccw();
//! tree.flip_horizontal();
//! let out: image::RgbaImage = tree.render(2).unwrap();
//! assert_eq!(out.dimensions(), (6, 10));
//! ```

pub mod node;
pub mod tree;

pub use node::*;
pub use tree::prune::PruneStats;
pub use tree::QTree;
