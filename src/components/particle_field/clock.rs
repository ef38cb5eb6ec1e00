//! Frame throttling and pause state for the animation loop.
//!
//! The host calls back once per presented frame with a millisecond
//! timestamp. [`FrameClock::tick`] decides whether that callback should run
//! a simulation step, which caps the visual update rate at the target rate
//! regardless of the display's refresh rate.

/// Whether the loop is doing work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
	#[default]
	Running,
	/// Tab hidden; callbacks keep arriving but do nothing.
	Paused,
}

/// How often the FPS estimate is refreshed, in host milliseconds.
const FPS_WINDOW_MS: f64 = 1000.0;

/// Throttles host frame callbacks to a target interval.
#[derive(Clone, Debug)]
pub struct FrameClock {
	state: RunState,
	frame_interval: f64,
	last_frame: f64,
	/// Frames processed since creation.
	frames: u64,
	fps: f64,
	fps_frames: u64,
	fps_window_start: Option<f64>,
	fps_fresh: bool,
}

impl FrameClock {
	/// `frame_interval` is in milliseconds.
	pub fn new(frame_interval: f64) -> Self {
		Self {
			state: RunState::Running,
			frame_interval,
			last_frame: 0.0,
			frames: 0,
			fps: 0.0,
			fps_frames: 0,
			fps_window_start: None,
			fps_fresh: false,
		}
	}

	pub fn state(&self) -> RunState {
		self.state
	}

	pub fn is_paused(&self) -> bool {
		self.state == RunState::Paused
	}

	pub fn frame_interval(&self) -> f64 {
		self.frame_interval
	}

	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Processed frames per second over the last full window.
	pub fn fps(&self) -> f64 {
		self.fps
	}

	pub fn pause(&mut self) {
		self.state = RunState::Paused;
	}

	/// Resume after a pause. The FPS window restarts so hidden time is not
	/// counted.
	pub fn resume(&mut self) {
		if self.state == RunState::Paused {
			self.state = RunState::Running;
			self.fps_window_start = None;
			self.fps_frames = 0;
		}
	}

	pub fn set_visible(&mut self, visible: bool) {
		if visible {
			self.resume();
		} else {
			self.pause();
		}
	}

	/// Returns `true` when a step should run for this callback.
	pub fn tick(&mut self, timestamp: f64) -> bool {
		if self.is_paused() || timestamp - self.last_frame < self.frame_interval {
			return false;
		}
		self.last_frame = timestamp;
		self.frames += 1;
		self.sample_fps(timestamp);
		true
	}

	fn sample_fps(&mut self, timestamp: f64) {
		let Some(start) = self.fps_window_start else {
			self.fps_window_start = Some(timestamp);
			self.fps_frames = 0;
			return;
		};
		self.fps_frames += 1;

		let elapsed = timestamp - start;
		if elapsed >= FPS_WINDOW_MS {
			self.fps = self.fps_frames as f64 * 1000.0 / elapsed;
			self.fps_fresh = true;
			self.fps_frames = 0;
			self.fps_window_start = Some(timestamp);
		}
	}

	/// Returns the FPS estimate once per closed window.
	pub fn take_fps(&mut self) -> Option<f64> {
		std::mem::take(&mut self.fps_fresh).then_some(self.fps)
	}
}
