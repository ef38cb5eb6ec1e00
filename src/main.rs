//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use leptos::prelude::*;
use log::error;
use particle_field::{App, DEFAULT_CANVAS_ID, attach_to_canvas, has_static_canvas, init_logging, load_config};

fn main() {
	init_logging();

	// Static pages ship their own canvas; otherwise render one.
	if has_static_canvas() {
		match attach_to_canvas(DEFAULT_CANVAS_ID, load_config()) {
			Ok(driver) => driver.keep_alive(),
			Err(e) => error!("particle-field: {}", e),
		}
		return;
	}

	mount_to_body(|| {
		view! { <App /> }
	})
}
