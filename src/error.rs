//! Error types for starting the particle field.
//!
//! Only startup can fail. Once a driver is running every per-frame step is
//! infallible.

use thiserror::Error;

/// Errors that abort particle field construction.
#[derive(Debug, Error)]
pub enum FieldError {
	/// No global `window` or `document` (not running in a browser page).
	#[error("no browser window or document available")]
	NoWindow,

	/// The requested canvas element does not exist or is not a canvas.
	#[error("canvas element #{0} not found")]
	SurfaceMissing(String),

	/// The canvas refused to hand out a 2D rendering context.
	#[error("could not acquire a 2D rendering context")]
	ContextUnavailable,

	/// Page-supplied configuration was not valid JSON for `FieldConfig`.
	#[error("invalid particle field config: {0}")]
	Config(#[from] serde_json::Error),
}
