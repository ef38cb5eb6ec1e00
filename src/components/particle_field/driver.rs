//! Browser wiring: host listeners and the `requestAnimationFrame` chain.
//!
//! A [`FieldDriver`] owns every closure it hands to the browser. Dropping it
//! removes the listeners and cancels the pending frame request, so the loop
//! does not outlive whoever started it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window,
};

use super::config::FieldConfig;
use super::state::FieldState;
use super::surface::{self, Surface};
use crate::error::FieldError;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A registered DOM event listener, kept so it can be removed again.
struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

/// Runs a particle field on a canvas until dropped.
pub struct FieldDriver {
	state: Rc<RefCell<FieldState>>,
	window: Window,
	animate: FrameCallback,
	frame_request: Rc<Cell<Option<i32>>>,
	listeners: Vec<Listener>,
}

impl FieldDriver {
	/// Size the canvas to the viewport, wire up host signals and start the
	/// frame loop.
	pub fn start(canvas: HtmlCanvasElement, config: FieldConfig) -> Result<Self, FieldError> {
		let window = web_sys::window().ok_or(FieldError::NoWindow)?;
		let document = window.document().ok_or(FieldError::NoWindow)?;
		let ctx = surface::context_2d(&canvas)?;

		let (width, height) = viewport_size(&window);
		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		let mut state = FieldState::new(config, width, height, seed);
		Surface::resize(&ctx, width, height);
		state.set_scroll(window.scroll_y().unwrap_or(0.0));
		if document.hidden() {
			state.set_visible(false);
		}
		info!(
			"particle-field: started with {} particles on {}x{}",
			state.field.particles.len(),
			width,
			height
		);

		let mut driver = Self {
			state: Rc::new(RefCell::new(state)),
			window: window.clone(),
			animate: Rc::new(RefCell::new(None)),
			frame_request: Rc::new(Cell::new(None)),
			listeners: Vec::new(),
		};
		driver.listen_viewport(&window, &document, &ctx);
		driver.listen_pointer(&window, &document, &canvas);
		driver.start_frames(ctx);
		Ok(driver)
	}

	/// Leave the field running for the rest of the page's life.
	pub fn keep_alive(self) {
		std::mem::forget(self);
	}

	fn listen(
		&mut self,
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		if let Err(err) =
			target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
		{
			warn!("particle-field: could not listen for {}: {:?}", event, err);
			return;
		}
		self.listeners.push(Listener {
			target: target.clone(),
			event,
			callback,
		});
	}

	fn listen_viewport(
		&mut self,
		window: &Window,
		document: &Document,
		ctx: &CanvasRenderingContext2d,
	) {
		let (state, win, ctx) = (self.state.clone(), window.clone(), ctx.clone());
		self.listen(window, "resize", move |_| {
			let (w, h) = viewport_size(&win);
			state.borrow_mut().resize(&ctx, w, h);
		});

		let (state, win) = (self.state.clone(), window.clone());
		self.listen(window, "scroll", move |_| {
			state
				.borrow_mut()
				.set_scroll(win.scroll_y().unwrap_or(0.0));
		});

		let (state, doc) = (self.state.clone(), document.clone());
		self.listen(document, "visibilitychange", move |_| {
			state.borrow_mut().set_visible(!doc.hidden());
		});
	}

	/// The canvas sits behind page content, so pointer movement is tracked on
	/// the window and translated into canvas coordinates.
	fn listen_pointer(
		&mut self,
		window: &Window,
		document: &Document,
		canvas: &HtmlCanvasElement,
	) {
		let (state, canvas) = (self.state.clone(), canvas.clone());
		self.listen(window, "mousemove", move |ev| {
			let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
				return;
			};
			let rect = canvas.get_bounding_client_rect();
			state.borrow_mut().set_pointer(
				ev.client_x() as f64 - rect.left(),
				ev.client_y() as f64 - rect.top(),
			);
		});

		if let Some(root) = document.document_element() {
			let state = self.state.clone();
			self.listen(&root, "mouseleave", move |_| {
				state.borrow_mut().clear_pointer();
			});
		}
	}

	fn start_frames(&mut self, ctx: CanvasRenderingContext2d) {
		let (state, animate, request, window) = (
			self.state.clone(),
			self.animate.clone(),
			self.frame_request.clone(),
			self.window.clone(),
		);
		*self.animate.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			state.borrow_mut().frame(&ctx, timestamp);
			if let Some(ref cb) = *animate.borrow() {
				request.set(
					window
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));
		if let Some(ref cb) = *self.animate.borrow() {
			self.frame_request.set(
				self.window
					.request_animation_frame(cb.as_ref().unchecked_ref())
					.ok(),
			);
		}
	}
}

impl Drop for FieldDriver {
	fn drop(&mut self) {
		if let Some(id) = self.frame_request.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		// The frame closure holds a handle to its own slot; clearing it breaks the cycle.
		self.animate.borrow_mut().take();
		for listener in self.listeners.drain(..) {
			let _ = listener.target.remove_event_listener_with_callback(
				listener.event,
				listener.callback.as_ref().unchecked_ref(),
			);
		}
		info!("particle-field: stopped");
	}
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let dimension = |value: Result<JsValue, JsValue>| {
		value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
	};
	(dimension(window.inner_width()), dimension(window.inner_height()))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use super::*;
	use wasm_bindgen_test::*;
	use web_sys::MouseEventInit;

	wasm_bindgen_test_configure!(run_in_browser);

	fn mounted_canvas() -> HtmlCanvasElement {
		let document = web_sys::window().unwrap().document().unwrap();
		let canvas: HtmlCanvasElement = document
			.create_element("canvas")
			.unwrap()
			.dyn_into()
			.unwrap();
		canvas
			.set_attribute(
				"style",
				"position: fixed; left: 30px; top: 20px; width: 100px; height: 100px;",
			)
			.unwrap();
		document.body().unwrap().append_child(&canvas).unwrap();
		canvas
	}

	fn mouse_move(x: i32, y: i32) -> Event {
		let init = MouseEventInit::new();
		init.set_client_x(x);
		init.set_client_y(y);
		MouseEvent::new_with_mouse_event_init_dict("mousemove", &init)
			.unwrap()
			.into()
	}

	fn shrink(state: &Rc<RefCell<FieldState>>) {
		state.borrow_mut().field.resize(10.0, 10.0);
	}

	#[wasm_bindgen_test]
	fn pointer_is_reported_in_canvas_coordinates() {
		let window = web_sys::window().unwrap();
		let driver = FieldDriver::start(mounted_canvas(), FieldConfig::default()).unwrap();
		let state = driver.state.clone();

		window.dispatch_event(&mouse_move(130, 70)).unwrap();
		assert_eq!(state.borrow().pointer(), Some((100.0, 50.0)));

		let root = window.document().unwrap().document_element().unwrap();
		root.dispatch_event(&Event::new("mouseleave").unwrap()).unwrap();
		assert_eq!(state.borrow().pointer(), None);
	}

	#[wasm_bindgen_test]
	fn drop_detaches_listeners_and_frame_loop() {
		let window = web_sys::window().unwrap();
		let driver = FieldDriver::start(mounted_canvas(), FieldConfig::default()).unwrap();
		let (state, animate, request) = (
			driver.state.clone(),
			driver.animate.clone(),
			driver.frame_request.clone(),
		);
		assert_eq!(driver.listeners.len(), 5);
		assert!(request.get().is_some());
		assert!(animate.borrow().is_some());

		let (width, _) = viewport_size(&window);
		shrink(&state);
		window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
		assert_eq!(state.borrow().field.width(), width);

		drop(driver);
		assert_eq!(request.get(), None);
		assert!(animate.borrow().is_none());

		shrink(&state);
		window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
		window.dispatch_event(&mouse_move(130, 70)).unwrap();
		assert_eq!(state.borrow().field.width(), 10.0);
		assert_eq!(state.borrow().pointer(), None);
	}
}
