//! Tunable parameters for the particle field.
//!
//! Every field has a default matching the stock look, so a page-supplied JSON
//! override only needs to name what it changes:
//!
//! ```json
//! { "target_fps": 30, "palette": ["rgb(0, 200, 255)", "rgba(0, 120, 255, 0.8)"] }
//! ```

use serde::Deserialize;

use super::theme::{Color, Palette};
use crate::error::FieldError;

/// Viewport width breakpoint and the particle count used below it.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Breakpoint {
	pub max_width: f64,
	pub count: usize,
}

/// Particle field configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Ascending breakpoints; the first whose `max_width` exceeds the viewport
	/// width wins.
	pub breakpoints: Vec<Breakpoint>,
	/// Count used when the viewport is wider than every breakpoint.
	pub max_count: usize,
	pub repulsion_radius: f64,
	pub repulsion_strength: f64,
	pub connection_distance: f64,
	pub connection_alpha: f64,
	pub connection_width: f64,
	/// CSS color for connection lines; alpha is ignored.
	pub connection_color: String,
	pub target_fps: f64,
	/// CSS colors particles draw from.
	pub palette: Vec<String>,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			breakpoints: vec![
				Breakpoint {
					max_width: 768.0,
					count: 30,
				},
				Breakpoint {
					max_width: 1024.0,
					count: 40,
				},
			],
			max_count: 50,
			repulsion_radius: 150.0,
			repulsion_strength: 0.3,
			connection_distance: 120.0,
			connection_alpha: 0.1,
			connection_width: 0.5,
			connection_color: "rgb(182, 145, 33)".into(),
			target_fps: 60.0,
			palette: Palette::ember().colors.iter().map(|c| c.to_css()).collect(),
		}
	}
}

impl FieldConfig {
	pub fn from_json(json: &str) -> Result<Self, FieldError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Target particle count for a viewport width.
	pub fn particle_count(&self, width: f64) -> usize {
		self.breakpoints
			.iter()
			.find(|bp| width < bp.max_width)
			.map(|bp| bp.count)
			.unwrap_or(self.max_count)
	}

	/// Milliseconds between processed frames.
	pub fn frame_interval(&self) -> f64 {
		1000.0 / self.target_fps.max(1.0)
	}

	/// Parsed palette, or the stock palette when none of the entries parse.
	pub fn palette(&self) -> Palette {
		Palette::from_css(&self.palette).unwrap_or_else(|| {
			log::warn!("particle-field: empty palette, using defaults");
			Palette::default()
		})
	}

	pub fn line_color(&self) -> Color {
		Color::parse_or_black(&self.connection_color).with_alpha(1.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn breakpoints_pick_counts() {
		let config = FieldConfig::default();
		assert_eq!(config.particle_count(500.0), 30);
		assert_eq!(config.particle_count(767.9), 30);
		assert_eq!(config.particle_count(768.0), 40);
		assert_eq!(config.particle_count(900.0), 40);
		assert_eq!(config.particle_count(1024.0), 50);
		assert_eq!(config.particle_count(1200.0), 50);
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config = FieldConfig::from_json(r#"{ "target_fps": 30, "max_count": 80 }"#).unwrap();
		assert_eq!(config.max_count, 80);
		assert_eq!(config.frame_interval(), 1000.0 / 30.0);
		assert_eq!(config.repulsion_radius, 150.0);
		assert_eq!(config.palette(), Palette::default());
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(matches!(
			FieldConfig::from_json("{ target_fps: }"),
			Err(FieldError::Config(_))
		));
	}

	#[test]
	fn unusable_palette_falls_back() {
		let config = FieldConfig {
			palette: vec!["blue".into()],
			..FieldConfig::default()
		};
		assert_eq!(config.palette(), Palette::default());
	}

	#[test]
	fn default_line_color() {
		assert_eq!(FieldConfig::default().line_color(), Color::rgb(182, 145, 33));
	}
}
