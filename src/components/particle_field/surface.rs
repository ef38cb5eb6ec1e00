//! The drawing surface the renderer targets.
//!
//! Rendering goes through [`Surface`] so the simulation and render passes can
//! be exercised without a browser. The production implementation is the
//! canvas 2D context.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::theme::Color;
use crate::error::FieldError;

/// Minimal 2D drawing operations used by the particle renderer.
pub trait Surface {
	/// Resize the backing store to the given size in pixels.
	fn resize(&self, width: f64, height: f64);
	fn clear(&self, width: f64, height: f64);
	/// Filled circle with a soft glow of radius `glow` in the same color.
	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Color, alpha: f64, glow: f64);
	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
}

impl Surface for CanvasRenderingContext2d {
	fn resize(&self, width: f64, height: f64) {
		if let Some(canvas) = self.canvas() {
			canvas.set_width(width as u32);
			canvas.set_height(height as u32);
		}
	}

	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Color, alpha: f64, glow: f64) {
		let css = color.to_css();
		self.save();
		self.set_global_alpha(alpha);
		self.set_shadow_color(&css);
		self.set_shadow_blur(glow);
		self.set_fill_style_str(&css);
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
		self.restore();
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

/// Look up a canvas element by id.
pub fn find_canvas(document: &Document, id: &str) -> Result<HtmlCanvasElement, FieldError> {
	document
		.get_element_by_id(id)
		.and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
		.ok_or_else(|| FieldError::SurfaceMissing(id.to_string()))
}

/// Acquire the 2D rendering context of a canvas.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, FieldError> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		.ok_or(FieldError::ContextUnavailable)
}
