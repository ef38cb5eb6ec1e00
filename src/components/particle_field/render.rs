//! Per-frame drawing of the particle field.
//!
//! Two passes: particles with their glow first, then the faint connection
//! lines between nearby pairs on top.

use super::config::FieldConfig;
use super::particles::ParticleField;
use super::surface::Surface;

/// Alpha of the connection line between two particles `distance` apart.
///
/// Zero at or beyond `connection_distance`, rising linearly to
/// `connection_alpha` for coincident particles.
pub fn connection_alpha(config: &FieldConfig, distance: f64) -> f64 {
	let max = config.connection_distance;
	if max <= 0.0 || distance >= max {
		return 0.0;
	}
	((max - distance) / max).max(0.0) * config.connection_alpha
}

/// Renders the complete field to the surface.
pub fn render<S: Surface>(field: &ParticleField, surface: &S) {
	surface.clear(field.width(), field.height());
	draw_particles(field, surface);
	draw_connections(field, surface);
}

fn draw_particles<S: Surface>(field: &ParticleField, surface: &S) {
	for p in &field.particles {
		surface.fill_circle(p.x, p.y, p.size, p.current_color(), p.opacity, p.size * 2.0);
	}
}

fn draw_connections<S: Surface>(field: &ParticleField, surface: &S) {
	let config = field.config();
	let line = field.line_color();
	let particles = &field.particles;

	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let alpha = connection_alpha(config, a.distance_to(b));
			if alpha <= 0.0 {
				continue;
			}
			surface.stroke_line(
				(a.x, a.y),
				(b.x, b.y),
				line.with_alpha(alpha),
				config.connection_width,
			);
		}
	}
}
