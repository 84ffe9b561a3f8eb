use image::error::ImageError;

use qtree_img::error::{BuildError, PruneError, RenderError};
use qtree_img::QTree;

use tracing_subscriber::EnvFilter;

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// Parses an optional numeric argument, exiting on garbage.
fn numeric_arg<T: std::str::FromStr>(matches: &clap::ArgMatches, name: &str, default: &str) -> T {
	match matches.value_of(name).unwrap_or(default).parse() {
		Ok(n) => n,
		Err(_) => error_exit(&format!("Non-numeric value for {}", name), 2)
	}
}

/// `clap`-based CLI that runs an image through a quadtree.
///
/// The tree is built from INPUT, then pruned, flipped and rotated (each only
/// if requested, in that order), and rendered to OUTPUT.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid image data
///
/// 5: computation limits exceeded
///
/// 10: other, potentially unknown error
fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(std::io::stderr)
		.init();

	let clap_matches = clap::App::new("qtree_img")
		.version(env!("CARGO_PKG_VERSION"))
		.author("vkcz")
		.about("Builds a quadtree from an image, transforms it, and renders it back.")
		.arg_from_usage("-s, --scale=[N] 'Integer upscaling factor for the rendered output; defaults to 1'")
		.arg_from_usage("-p, --prune=[TOL] 'Collapse subtrees whose pixels are within TOL (0 to 1) of their average'")
		.arg_from_usage("-f, --flip 'Mirror the image horizontally'")
		.arg_from_usage("-r, --rotate=[N] 'Number of 90 degree counter-clockwise turns; defaults to 0'")
		.arg_from_usage("<INPUT> 'Path to input file'")
		.arg_from_usage("[OUTPUT] 'Path to output PNG file; defaults to INPUT with a modified file name'")
		.get_matches();

	let input_path = clap_matches.value_of("INPUT").unwrap();
	let scale: u32 = numeric_arg(&clap_matches, "scale", "1");
	let turns: u32 = numeric_arg(&clap_matches, "rotate", "0");
	let tolerance: Option<f64> = clap_matches.value_of("prune")
		.map(|_| numeric_arg(&clap_matches, "prune", "0"));

	let source = match image::open(input_path) {
		Ok(i) => i,
		Err(e) => {
			let (msg, code) = match e {
				ImageError::Decoding(_) => ("Invalid image data", 4),
				ImageError::Limits(_) => ("Computation limits exceeded", 5),
				ImageError::IoError(_) => ("File not found or could not be read", 3),
				_ => ("An error occurred", 10)
			};
			error_exit(msg, code)
		}
	}.into_rgba8();

	let mut tree = match QTree::from_image(&source) {
		Ok(t) => t,
		Err(BuildError::TooLarge { .. }) => error_exit("Input image is too large", 5)
	};
	tracing::info!(nodes = tree.node_count(), leaves = tree.leaf_count(), "built tree");

	if let Some(tolerance) = tolerance {
		match tree.prune(tolerance) {
			Ok(stats) => tracing::info!(
				nodes = stats.nodes_after,
				leaves = stats.leaves_after,
				"pruned tree"
			),
			Err(e @ PruneError::InvalidTolerance(_)) => error_exit(&e.to_string(), 2),
			Err(PruneError::AlreadyPruned) => error_exit("Tree was already pruned", 10),
		}
	}
	if clap_matches.is_present("flip") {
		tree.flip_horizontal();
	}
	for _ in 0..turns % 4 {
		tree.rotate_ccw();
	}

	let output: image::RgbaImage = match tree.render(scale) {
		Ok(o) => o,
		Err(e) => {
			let (msg, code) = match e {
				RenderError::ZeroScale => ("Scale must be at least 1", 2),
				RenderError::TooLarge { .. } => ("Scaled output is too large", 5)
			};
			error_exit(msg, code)
		}
	};
	let default_output = input_path.rsplitn(2, '.').last().unwrap().to_string() + "-qtree.png";
	match output.save(clap_matches.value_of("OUTPUT").unwrap_or(&default_output)) {
		Ok(_) => (),
		Err(_) => error_exit("Could not save output", 3)
	}
}
