//! Particle simulation for the background field.
//!
//! Particles never leave the collection: when one runs out of life it is
//! respawned in the same slot, so the collection length only changes on a
//! resize that crosses a breakpoint.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::FieldConfig;
use super::theme::{Color, Palette};

const MIN_OPACITY: f64 = 0.2;
const MAX_OPACITY: f64 = 0.9;
const MAX_SPEED: f64 = 1.0;
const EDGE_DAMPING: f64 = 0.8;
const JITTER: f64 = 0.01;
const COLOR_STEP: f64 = 0.01;
const PARALLAX: f64 = 0.1 * 0.01;
/// Floor for the pointer distance when normalising the repulsion direction.
const MIN_REPULSION_DISTANCE: f64 = 1.0;

/// A single drifting particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub color: Color,
	pub target_color: Color,
	/// Progress from `color` to `target_color`, in `[0, 1)`.
	pub color_transition: f64,
	pub opacity: f64,
	pub fade_direction: f64,
	pub fade_speed: f64,
	pub life: i32,
}

impl Particle {
	/// Color currently shown, blended towards the target.
	pub fn current_color(&self) -> Color {
		self.color.lerp(self.target_color, self.color_transition)
	}

	pub fn distance_to(&self, other: &Particle) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Owns the particle collection and advances it one tick at a time.
pub struct ParticleField {
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
	config: FieldConfig,
	palette: Palette,
	line_color: Color,
	rng: SmallRng,
}

impl ParticleField {
	pub fn new(config: FieldConfig, width: f64, height: f64, seed: u64) -> Self {
		let palette = config.palette();
		let line_color = config.line_color();
		let mut field = Self {
			particles: Vec::new(),
			width,
			height,
			config,
			palette,
			line_color,
			rng: SmallRng::seed_from_u64(seed),
		};
		field.populate();
		field
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Opaque connection line color, parsed once from the config.
	pub fn line_color(&self) -> Color {
		self.line_color
	}

	/// Count the collection should hold for the current width.
	pub fn target_count(&self) -> usize {
		self.config.particle_count(self.width)
	}

	/// Resize the field bounds.
	///
	/// Returns `true` when the target count changed and the whole collection
	/// was regenerated.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		let previous = self.target_count();
		self.width = width;
		self.height = height;

		if self.target_count() == previous {
			return false;
		}
		self.populate();
		true
	}

	fn populate(&mut self) {
		let count = self.target_count();
		let particles = (0..count).map(|_| self.spawn()).collect();
		self.particles = particles;
		log::debug!(
			"particle-field: generated {} particles for {}x{}",
			count,
			self.width,
			self.height
		);
	}

	fn random_color(&mut self) -> Color {
		let index = self.rng.random_range(0..self.palette.len());
		self.palette.get(index)
	}

	fn spawn(&mut self) -> Particle {
		let x = self.rng.random::<f64>() * self.width;
		let y = self.rng.random::<f64>() * self.height;
		let vx = (self.rng.random::<f64>() - 0.5) * 0.5;
		let vy = (self.rng.random::<f64>() - 0.5) * 0.5;
		let size = self.rng.random::<f64>() * 3.0 + 1.0;
		let mut particle = Particle {
			x,
			y,
			vx,
			vy,
			size,
			color: Color::BLACK,
			target_color: Color::BLACK,
			color_transition: 0.0,
			opacity: 0.0,
			fade_direction: 1.0,
			fade_speed: 0.0,
			life: 0,
		};
		self.refresh(&mut particle);
		particle
	}

	/// Re-sample everything a respawn resets. Velocity and size carry over.
	fn refresh(&mut self, p: &mut Particle) {
		p.x = self.rng.random::<f64>() * self.width;
		p.y = self.rng.random::<f64>() * self.height;
		p.color = self.random_color();
		p.target_color = self.random_color();
		p.color_transition = 0.0;
		// Starts possibly above MAX_OPACITY; the first fade step clamps it.
		p.opacity = self.rng.random::<f64>() * 0.8 + 0.5;
		p.fade_direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
		p.fade_speed = self.rng.random::<f64>() * 0.02 + 0.01;
		p.life = self.rng.random_range(50..150);
	}

	/// Advance every particle by one tick.
	///
	/// `pointer` is the latest pointer position in surface coordinates, or
	/// `None` when the pointer is off the surface. `scroll` is the page's
	/// vertical scroll offset.
	pub fn update(&mut self, pointer: Option<(f64, f64)>, scroll: f64) {
		let mut particles = std::mem::take(&mut self.particles);
		for p in &mut particles {
			self.step(p, pointer, scroll);
		}
		self.particles = particles;
	}

	fn step(&mut self, p: &mut Particle, pointer: Option<(f64, f64)>, scroll: f64) {
		if let Some((mx, my)) = pointer {
			let (ix, iy) = self.repulsion(p, mx, my);
			p.vx += ix;
			p.vy += iy;
		}

		p.x += p.vx;
		p.y += p.vy;

		if scroll != 0.0 {
			p.y += scroll * PARALLAX;
		}

		p.vx += (self.rng.random::<f64>() - 0.5) * JITTER;
		p.vy += (self.rng.random::<f64>() - 0.5) * JITTER;

		p.vx = p.vx.clamp(-MAX_SPEED, MAX_SPEED);
		p.vy = p.vy.clamp(-MAX_SPEED, MAX_SPEED);

		if p.x <= 0.0 || p.x >= self.width {
			p.vx *= -EDGE_DAMPING;
		}
		if p.y <= 0.0 || p.y >= self.height {
			p.vy *= -EDGE_DAMPING;
		}
		p.x = p.x.clamp(0.0, self.width.max(0.0));
		p.y = p.y.clamp(0.0, self.height.max(0.0));

		p.life -= 1;

		p.opacity += p.fade_direction * p.fade_speed;
		if p.opacity <= MIN_OPACITY || p.opacity >= MAX_OPACITY {
			p.fade_direction = -p.fade_direction;
			p.opacity = p.opacity.clamp(MIN_OPACITY, MAX_OPACITY);
		}

		p.color_transition += COLOR_STEP;
		if p.color_transition >= 1.0 {
			p.color = p.target_color;
			p.target_color = self.random_color();
			p.color_transition = 0.0;
		}

		if p.life <= 0 {
			self.refresh(p);
			p.opacity = p.opacity.min(MAX_OPACITY);
		}
	}

	/// Velocity impulse pushing `p` away from the pointer.
	fn repulsion(&self, p: &Particle, mx: f64, my: f64) -> (f64, f64) {
		let radius = self.config.repulsion_radius;
		let (dx, dy) = (p.x - mx, p.y - my);
		let distance = (dx * dx + dy * dy).sqrt();
		if distance >= radius {
			return (0.0, 0.0);
		}

		let force = (radius - distance) / radius * self.config.repulsion_strength;
		let norm = distance.max(MIN_REPULSION_DISTANCE);
		(dx / norm * force, dy / norm * force)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	fn field(width: f64, height: f64) -> ParticleField {
		ParticleField::new(FieldConfig::default(), width, height, 7)
	}

	fn assert_in_bounds(field: &ParticleField) {
		for p in &field.particles {
			assert!((0.0..=field.width()).contains(&p.x), "x {} out of bounds", p.x);
			assert!((0.0..=field.height()).contains(&p.y), "y {} out of bounds", p.y);
			assert!((-1.0..=1.0).contains(&p.vx), "vx {}", p.vx);
			assert!((-1.0..=1.0).contains(&p.vy), "vy {}", p.vy);
			assert!((0.2..=0.9).contains(&p.opacity), "opacity {}", p.opacity);
		}
	}

	#[test]
	fn initial_particles_are_sampled_in_range() {
		let field = field(1200.0, 800.0);
		assert_eq!(field.particles.len(), 50);
		for p in &field.particles {
			assert!((1.0..4.0).contains(&p.size));
			assert!((0.5..1.3).contains(&p.opacity));
			assert!((50..150).contains(&p.life));
			assert!((0.01..0.03).contains(&p.fade_speed));
			assert!(p.fade_direction == 1.0 || p.fade_direction == -1.0);
			assert_eq!(p.color_transition, 0.0);
		}
	}

	#[test]
	fn count_follows_breakpoints() {
		assert_eq!(field(500.0, 600.0).particles.len(), 30);
		assert_eq!(field(900.0, 600.0).particles.len(), 40);
		assert_eq!(field(1200.0, 600.0).particles.len(), 50);
	}

	#[test]
	fn resize_regenerates_only_when_count_changes() {
		let mut field = field(1200.0, 800.0);
		let before = field.particles.clone();

		assert!(!field.resize(1100.0, 700.0));
		assert_eq!(field.particles, before);
		assert_eq!(field.height(), 700.0);

		assert!(field.resize(500.0, 700.0));
		assert_eq!(field.particles.len(), 30);
		assert!(field.resize(1023.0, 700.0));
		assert_eq!(field.particles.len(), 40);
	}

	#[test]
	fn update_keeps_invariants() {
		let mut field = field(900.0, 600.0);
		for tick in 0..500 {
			let pointer = (tick % 3 == 0).then_some((450.0, 300.0));
			field.update(pointer, 250.0);
			assert_eq!(field.particles.len(), 40);
			assert_in_bounds(&field);
		}
	}

	#[test]
	fn expired_particle_respawns_in_place() {
		let mut field = field(900.0, 600.0);
		field.particles[3].life = 1;
		field.update(None, 0.0);
		assert_eq!(field.particles.len(), 40);
		assert!(field.particles[3].life >= 50);
		assert!(field.particles[3].opacity <= 0.9);
		assert_eq!(field.particles[3].color_transition, 0.0);
	}

	#[test]
	fn color_transition_commits_target() {
		let mut field = field(900.0, 600.0);
		let p = &mut field.particles[0];
		p.life = 1_000;
		p.color_transition = 0.995;
		let target = p.target_color;
		field.update(None, 0.0);
		assert_eq!(field.particles[0].color, target);
		assert_eq!(field.particles[0].color_transition, 0.0);
	}

	#[test]
	fn pointer_pushes_particles_away() {
		let field = field(1200.0, 800.0);
		let p = field.particles[0].clone();
		let (ix, iy) = field.repulsion(&p, p.x - 10.0, p.y);
		assert!(ix > 0.0);
		assert_eq!(iy, 0.0);

		let (fx, fy) = field.repulsion(&p, p.x - 200.0, p.y);
		assert_eq!((fx, fy), (0.0, 0.0));
	}

	#[test]
	fn repulsion_scales_with_proximity() {
		let field = field(1200.0, 800.0);
		let p = field.particles[0].clone();
		let (near, _) = field.repulsion(&p, p.x - 10.0, p.y);
		let (far, _) = field.repulsion(&p, p.x - 140.0, p.y);
		assert!(near > far && far > 0.0);
		assert!((near - 140.0 / 150.0 * 0.3).abs() < 1e-12);
	}

	#[test]
	fn coincident_pointer_does_not_produce_nan() {
		let mut field = field(1200.0, 800.0);
		let (x, y) = (field.particles[0].x, field.particles[0].y);
		let (ix, iy) = field.repulsion(&field.particles[0], x, y);
		assert_eq!((ix, iy), (0.0, 0.0));

		field.update(Some((x, y)), 0.0);
		assert!(field.particles.iter().all(|p| p.vx.is_finite() && p.vy.is_finite()));
	}

	#[test]
	fn scroll_shifts_particles_down() {
		let mut field = field(900.0, 600.0);
		let p = &mut field.particles[0];
		p.x = 450.0;
		p.y = 300.0;
		p.vx = 0.0;
		p.vy = 0.0;
		p.life = 1_000;
		field.update(None, 1000.0);
		let p = &field.particles[0];
		// scroll * 0.1 * 0.01 = 1.0; jitter only touches velocity after the move.
		assert!((p.y - 301.0).abs() < 1e-9, "y {}", p.y);
		assert_eq!(p.x, 450.0);
	}

	#[test]
	fn custom_line_color_is_parsed_once() {
		let config = FieldConfig {
			connection_color: "rgba(10, 20, 30, 0.4)".into(),
			..FieldConfig::default()
		};
		let field = ParticleField::new(config, 500.0, 500.0, 1);
		assert_eq!(field.line_color(), Color::rgb(10, 20, 30));
	}

	#[test]
	fn edges_reflect_with_damping() {
		let mut field = field(900.0, 600.0);
		let p = &mut field.particles[0];
		p.x = 899.9;
		p.vx = 1.0;
		p.life = 1_000;
		field.update(None, 0.0);
		let p = &field.particles[0];
		assert_eq!(p.x, 900.0);
		assert!(p.vx < 0.0 && p.vx >= -0.8);
	}

	proptest! {
		#[test]
		fn invariants_hold_for_any_viewport(
			width in 0.0f64..2000.0,
			height in 0.0f64..1500.0,
			seed in any::<u64>(),
			mx in -100.0f64..2100.0,
			my in -100.0f64..1600.0,
			scroll in 0.0f64..5000.0,
		) {
			let mut field = ParticleField::new(FieldConfig::default(), width, height, seed);
			let expected = field.target_count();
			for _ in 0..20 {
				field.update(Some((mx, my)), scroll);
			}
			prop_assert_eq!(field.particles.len(), expected);
			for p in &field.particles {
				prop_assert!(p.x >= 0.0 && p.x <= width);
				prop_assert!(p.y >= 0.0 && p.y <= height);
				prop_assert!(p.vx.abs() <= 1.0 && p.vy.abs() <= 1.0);
				prop_assert!((0.2..=0.9).contains(&p.opacity));
			}
		}
	}
}
