//! Crate-wide error type.

use wasm_bindgen::JsValue;

/// Failures inside a single enhancement step. None of them are fatal to the page.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A URL could not be parsed or joined.
	#[error("invalid url: {0}")]
	Url(#[from] url::ParseError),

	/// A JavaScript call threw.
	#[error("javascript error: {0}")]
	Js(String),

	/// The server answered with a non-success status.
	#[error("request for {url} failed with status {status}")]
	Status {
		/// Requested URL.
		url: String,
		/// HTTP status code.
		status: u16,
	},

	/// JSON payload did not match the expected shape.
	#[error("malformed json: {0}")]
	Json(#[from] serde_json::Error),

	/// A required DOM element is not on the page.
	#[error("element not found: {0}")]
	MissingElement(String),
}

impl From<JsValue> for Error {
	fn from(value: JsValue) -> Self {
		let msg = value
			.as_string()
			.or_else(|| {
				js_sys::Reflect::get(&value, &JsValue::from_str("message"))
					.ok()
					.and_then(|m| m.as_string())
			})
			.unwrap_or_else(|| format!("{value:?}"));
		Self::Js(msg)
	}
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
