//! Leptos component hosting the particle field canvas.
//!
//! The canvas is fixed to the viewport behind page content and ignores
//! pointer events; the [`FieldDriver`] tracks the pointer on the window
//! instead. The driver is started once the canvas is mounted and dropped
//! when the component is cleaned up.

use leptos::prelude::*;
use log::error;
use web_sys::HtmlCanvasElement;

use super::config::FieldConfig;
use super::driver::FieldDriver;

const CANVAS_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; \
	z-index: -1; pointer-events: none; display: block;";

/// Renders the animated particle field as a full-viewport page background.
///
/// Pass a [`FieldConfig`] to override the defaults. If the canvas cannot hand
/// out a 2D context the failure is logged and the rest of the page keeps
/// working without the background.
#[component]
pub fn ParticleFieldCanvas(#[prop(optional)] config: Option<FieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let driver = StoredValue::new_local(None::<FieldDriver>);
	let config = config.unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if driver.with_value(Option::is_some) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match FieldDriver::start(canvas, config.clone()) {
			Ok(started) => driver.set_value(Some(started)),
			Err(err) => error!("particle-field: {}", err),
		}
	});

	on_cleanup(move || {
		driver.try_update_value(|slot| {
			slot.take();
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			aria-hidden="true"
			style=CANVAS_STYLE
		/>
	}
}
