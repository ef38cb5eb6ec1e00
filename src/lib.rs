//! particle-field: animated particle background for web pages.
//!
//! This crate provides a WASM particle field that drifts behind page content,
//! reacts to the pointer and scroll position, and links nearby particles with
//! faint lines. It can run as a Leptos component or attach to an existing
//! `<canvas>` on a static page.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;

pub use components::particle_field::{FieldConfig, FieldDriver, ParticleFieldCanvas};
pub use error::FieldError;

/// Id of the canvas a static page provides for the background.
pub const DEFAULT_CANVAS_ID: &str = "particleCanvas";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load configuration overrides from a script element with id="field-config".
/// Falls back to defaults when the element is absent or malformed.
pub fn load_config() -> FieldConfig {
	let Some(json_text) = config_script_text() else {
		return FieldConfig::default();
	};

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("particle-field: loaded config overrides");
			config
		}
		Err(e) => {
			warn!("particle-field: {}, using defaults", e);
			FieldConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Start the particle field on an existing canvas element.
pub fn attach_to_canvas(id: &str, config: FieldConfig) -> Result<FieldDriver, FieldError> {
	let window = web_sys::window().ok_or(FieldError::NoWindow)?;
	let document = window.document().ok_or(FieldError::NoWindow)?;
	let canvas = components::particle_field::surface::find_canvas(&document, id)?;
	FieldDriver::start(canvas, config)
}

/// Whether the page already provides a canvas for the background.
pub fn has_static_canvas() -> bool {
	web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(DEFAULT_CANVAS_ID))
		.is_some()
}

/// Main application component.
/// Loads configuration from the DOM and renders the background field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();

	view! {
		<Title text="Particle Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas config=config />
	}
}
