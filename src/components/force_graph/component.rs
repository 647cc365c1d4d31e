use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::options::ChartOptions;
use super::render;
use super::state::ForceGraphState;
use super::types::GraphData;

type Frame = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn parent_size(canvas: &HtmlCanvasElement, window: &Window, fullscreen: bool) -> (f64, f64) {
	if fullscreen {
		let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
			v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
		};
		return (dim(window.inner_width(), 800.0), dim(window.inner_height(), 600.0));
	}
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((300.0, 300.0))
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed graph drawn on a canvas that fills its parent (or the window).
///
/// Dragging a node pins it, dragging the background pans, the wheel zooms. Clicking a
/// node with a URL calls `on_node_click`. Unmounting stops the animation loop.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<Arc<GraphData>>,
	options: ChartOptions,
	#[prop(default = false)] fullscreen: bool,
	#[prop(optional)] on_node_click: Option<Callback<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Frame = Rc::new(RefCell::new(None));
	let resize_cb: Frame = Rc::new(RefCell::new(None));
	let disposed = Arc::new(AtomicBool::new(false));
	let (state_init, animate_init, resize_cb_init, disposed_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), disposed.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("canvas 2d context unavailable");
			return;
		};

		let (w, h) = parent_size(&canvas, &window, fullscreen);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let graph = data.get();
		debug!("drawing graph with {} nodes", graph.nodes.len());
		*state_init.borrow_mut() = Some(ForceGraphState::new(&graph, options.clone(), w, h));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = parent_size(&canvas_resize, &win, fullscreen);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, resize_inner, disposed_anim) = (
			state_init.clone(),
			animate_init.clone(),
			resize_cb_init.clone(),
			disposed_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if disposed_anim.load(Ordering::Relaxed) {
				// Tear down from inside the loop; wasm-bindgen defers the drop until we return.
				if let (Some(win), Some(cb)) = (web_sys::window(), resize_inner.borrow_mut().take()) {
					let _ = win.remove_event_listener_with_callback(
						"resize",
						cb.as_ref().unchecked_ref(),
					);
				}
				state_anim.borrow_mut().take();
				animate_inner.borrow_mut().take();
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	on_cleanup(move || disposed.store(true, Ordering::Relaxed));

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let (Some((x, y)), Some(s)) = (pointer(canvas_ref, &ev), state_md.borrow_mut().as_mut()) {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let (Some((x, y)), Some(s)) = (pointer(canvas_ref, &ev), state_mm.borrow_mut().as_mut()) {
			s.pointer_moved(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = state_mu.borrow_mut().as_mut().and_then(|s| s.release());
		// Navigating may unmount this chart, so the state borrow must be released first.
		if let (Some(url), Some(cb)) = (clicked, on_node_click) {
			cb.run(url);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(s) = state_ml.borrow_mut().as_mut() {
			s.leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
