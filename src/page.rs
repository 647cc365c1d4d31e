//! Page lifecycle and small DOM helpers shared by the enhancement modules.

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::{Error, Result};

/// The global window.
pub fn window() -> Result<Window> {
	web_sys::window().ok_or_else(|| Error::MissingElement("window".into()))
}

/// The window's document.
pub fn document() -> Result<Document> {
	window()?
		.document()
		.ok_or_else(|| Error::MissingElement("document".into()))
}

/// Attach a listener for the rest of the page's lifetime.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
	F: FnMut(Event) + 'static,
{
	let cb = Closure::<dyn FnMut(Event)>::new(handler);
	target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
	cb.forget();
	Ok(())
}

/// Run `f` once the document has been parsed.
pub fn on_document_ready<F>(f: F) -> Result<()>
where
	F: FnOnce() + 'static,
{
	let document = document()?;
	if document.ready_state() != "loading" {
		f();
		return Ok(());
	}
	let mut f = Some(f);
	listen(&document, "DOMContentLoaded", move |_| {
		if let Some(f) = f.take() {
			f();
		}
	})
}

/// Run `f` on every page view.
///
/// Themes with instant navigation publish each swapped-in page on a `document$`
/// observable; without one this is the same as [`on_document_ready`].
pub fn on_page_ready<F>(f: F) -> Result<()>
where
	F: FnMut() + 'static,
{
	let window = window()?;
	let observable = js_sys::Reflect::get(&window, &JsValue::from_str("document$"))?;
	let subscribe = if observable.is_object() {
		js_sys::Reflect::get(&observable, &JsValue::from_str("subscribe"))?
			.dyn_into::<js_sys::Function>()
			.ok()
	} else {
		None
	};

	match subscribe {
		Some(subscribe) => {
			debug!("subscribing to document$");
			let mut f = f;
			let cb = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| f());
			subscribe.call1(&observable, cb.as_ref().unchecked_ref())?;
			cb.forget();
			Ok(())
		}
		None => {
			let mut f = f;
			on_document_ready(move || f())
		}
	}
}

/// Log and swallow a failed enhancement step.
pub fn report(context: &str, result: Result<()>) {
	if let Err(e) = result {
		warn!("{context}: {e}");
	}
}

/// Toggle `class` on `el`.
pub fn set_hidden(el: &Element, class: &str, hidden: bool) {
	let classes = el.class_list();
	let _ = if hidden {
		classes.add_1(class)
	} else {
		classes.remove_1(class)
	};
}

/// Narrow an element to an `HtmlElement`.
pub fn as_html(el: Element) -> Result<HtmlElement> {
	el.dyn_into::<HtmlElement>()
		.map_err(|_| Error::MissingElement("html element".into()))
}

/// Absolute document offset of an element's top edge.
pub fn offset_top(window: &Window, el: &Element) -> f64 {
	el.get_bounding_client_rect().top() + window.scroll_y().unwrap_or(0.0)
}

/// Current background colour of the page body.
pub fn body_background(window: &Window, document: &Document) -> Option<String> {
	let body = document.body()?;
	let style = window.get_computed_style(&body).ok()??;
	style.get_property_value("background-color").ok()
}
