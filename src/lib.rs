//! Client-side enhancements for a static documentation site.
//!
//! Three independent parts run on each page: code block highlighting, the search overlay
//! with its heading scroll-spy, and the link graph viewer.

#[cfg(all(target_arch = "wasm32", test))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

use log::{Level, info};

pub mod components;
pub mod config;
pub mod error;
pub mod page;

pub use config::Config;
pub use error::{Error, Result};

use crate::components::{force_graph, highlight, search};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Read the page configuration and start every enhancement.
///
/// A failing part is logged and does not stop the others.
pub fn start() {
	let config = match page::document() {
		Ok(document) => Config::from_document(&document),
		Err(e) => {
			log::error!("no document to enhance: {e}");
			return;
		}
	};
	page::report("highlight", highlight::start(config.highlight.clone()));
	page::report("search", search::start(config.search.clone()));
	page::report("graph", force_graph::start(&config));
}
