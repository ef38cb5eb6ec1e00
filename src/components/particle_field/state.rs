//! Engine state shared between host listeners and the frame loop.
//!
//! Listeners only write plain fields (pointer, scroll, visibility, size); the
//! next processed frame reads them. Everything runs on the page's single
//! thread so no further coordination is needed.

use super::clock::FrameClock;
use super::config::FieldConfig;
use super::particles::ParticleField;
use super::render;
use super::surface::Surface;

/// The particle field engine: simulation, frame clock and host inputs.
pub struct FieldState {
	pub field: ParticleField,
	pub clock: FrameClock,
	pointer: Option<(f64, f64)>,
	scroll: f64,
}

impl FieldState {
	pub fn new(config: FieldConfig, width: f64, height: f64, seed: u64) -> Self {
		let clock = FrameClock::new(config.frame_interval());
		Self {
			field: ParticleField::new(config, width, height, seed),
			clock,
			pointer: None,
			scroll: 0.0,
		}
	}

	pub fn pointer(&self) -> Option<(f64, f64)> {
		self.pointer
	}

	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = Some((x, y));
	}

	/// Pointer left the surface; repulsion stops.
	pub fn clear_pointer(&mut self) {
		self.pointer = None;
	}

	pub fn scroll(&self) -> f64 {
		self.scroll
	}

	pub fn set_scroll(&mut self, scroll: f64) {
		self.scroll = scroll;
	}

	pub fn set_visible(&mut self, visible: bool) {
		self.clock.set_visible(visible);
		log::debug!(
			"particle-field: {}",
			if visible { "resumed" } else { "paused" }
		);
	}

	/// Resize the surface and the field, regenerating particles if the count
	/// breakpoint changed.
	pub fn resize<S: Surface>(&mut self, surface: &S, width: f64, height: f64) {
		surface.resize(width, height);
		if self.field.resize(width, height) {
			log::debug!(
				"particle-field: viewport {}x{} now holds {} particles",
				width,
				height,
				self.field.particles.len()
			);
		}
	}

	/// Handle one host frame callback.
	///
	/// Returns `true` when the frame was processed (update and render ran).
	pub fn frame<S: Surface>(&mut self, surface: &S, timestamp: f64) -> bool {
		if !self.clock.tick(timestamp) {
			return false;
		}
		self.field.update(self.pointer, self.scroll);
		render::render(&self.field, surface);
		if let Some(fps) = self.clock.take_fps() {
			log::debug!("particle-field: {:.1} fps", fps);
		}
		true
	}
}
