//! Colors and palettes for the particle field.
//!
//! Colors are carried on particles as structured values; CSS strings only
//! appear at the canvas boundary and in page-supplied configuration.

use std::fmt;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	/// Opaque black, used when a color string cannot be parsed.
	pub const BLACK: Color = Color::rgb(0, 0, 0);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors.
	///
	/// Channels are rounded to the nearest integer, alpha stays fractional.
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let channel = |from: u8, to: u8| {
			(from as f64 * (1.0 - t) + to as f64 * t)
				.round()
				.clamp(0.0, 255.0) as u8
		};
		Self {
			r: channel(self.r, other.r),
			g: channel(self.g, other.g),
			b: channel(self.b, other.b),
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		self.to_string()
	}

	/// Parses `rgb(r, g, b)` or `rgba(r, g, b, a)` functional notation.
	///
	/// Returns `None` for anything else; see [`Color::parse_or_black`] for the
	/// lenient form used when rendering.
	pub fn parse(input: &str) -> Option<Self> {
		let s = input.trim();
		let body = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;

		let mut parts = body.split(',').map(str::trim);
		let r = parse_channel(parts.next()?)?;
		let g = parse_channel(parts.next()?)?;
		let b = parse_channel(parts.next()?)?;
		let a = match parts.next() {
			Some(alpha) => parse_alpha(alpha)?,
			None => 1.0,
		};
		if parts.next().is_some() {
			return None;
		}
		Some(Self { r, g, b, a })
	}

	pub fn parse_or_black(input: &str) -> Self {
		Self::parse(input).unwrap_or(Self::BLACK)
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Integer channel: digits only, saturated into `u8`.
fn parse_channel(s: &str) -> Option<u8> {
	if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	let value: u32 = s.parse().ok()?;
	Some(value.min(255) as u8)
}

/// Alpha channel: digits and dots only, clamped into `[0, 1]`.
fn parse_alpha(s: &str) -> Option<f64> {
	if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
		return None;
	}
	let value: f64 = s.parse().ok()?;
	Some(value.clamp(0.0, 1.0))
}

/// Interpolates between two CSS color strings.
///
/// Unparseable inputs fall back to opaque black before interpolation.
pub fn interpolate_css(from: &str, to: &str, t: f64) -> String {
	Color::parse_or_black(from)
		.lerp(Color::parse_or_black(to), t)
		.to_css()
}

/// A fixed set of colors particles draw from.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	pub colors: Vec<Color>,
}

impl Palette {
	/// Warm reds, pinks and violets.
	pub fn ember() -> Self {
		Self {
			colors: vec![
				Color::rgba(255, 0, 0, 1.0),    // Red
				Color::rgba(147, 0, 211, 0.9),  // Purple
				Color::rgba(255, 20, 147, 0.9), // Deep pink
				Color::rgba(220, 20, 60, 0.9),  // Crimson
				Color::rgba(255, 0, 255, 0.9),  // Magenta
				Color::rgba(138, 43, 226, 0.9), // Blue violet
			],
		}
	}

	/// Builds a palette from CSS strings, dropping entries that fail to parse.
	///
	/// Returns `None` when nothing usable remains.
	pub fn from_css<S: AsRef<str>>(entries: &[S]) -> Option<Self> {
		let colors: Vec<Color> = entries
			.iter()
			.filter_map(|entry| {
				let parsed = Color::parse(entry.as_ref());
				if parsed.is_none() {
					log::warn!("particle-field: ignoring palette entry {:?}", entry.as_ref());
				}
				parsed
			})
			.collect();
		(!colors.is_empty()).then_some(Self { colors })
	}

	pub fn len(&self) -> usize {
		self.colors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::ember()
	}
}
