//! Animated particle field for page backgrounds.
//!
//! Renders drifting, softly glowing particles on an HTML canvas with:
//! - Pointer repulsion and a slight scroll parallax
//! - Opacity pulsing and gradual palette color transitions
//! - Faint connection lines between nearby particles
//! - Frame-rate throttling, and no work at all while the tab is hidden
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, ParticleFieldCanvas};
//!
//! view! { <ParticleFieldCanvas config=FieldConfig::default() /> }
//! ```

mod clock;
mod component;
pub mod config;
mod driver;
mod particles;
mod render;
mod state;
pub mod surface;
pub mod theme;

pub use clock::{FrameClock, RunState};
pub use component::ParticleFieldCanvas;
pub use config::{Breakpoint, FieldConfig};
pub use driver::FieldDriver;
pub use particles::{Particle, ParticleField};
pub use render::{connection_alpha, render};
pub use state::FieldState;
pub use surface::Surface;
pub use theme::{Color, Palette};
