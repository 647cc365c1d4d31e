//! Page-supplied configuration.
//!
//! A page may embed `<script type="application/json" id="docsite-config">` with any subset
//! of the fields below; everything missing keeps its default.

use log::{debug, warn};
use serde::Deserialize;
use web_sys::Document;

use crate::error::Result;

/// Id of the inline config script element.
pub const CONFIG_ELEMENT_ID: &str = "docsite-config";

/// Top-level configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
	/// Code block highlighting.
	pub highlight: HighlightConfig,
	/// Search box and table-of-contents tracking.
	pub search: SearchConfig,
	/// Link graph.
	pub graph: GraphConfig,
	/// Site base URL, taken from `<body data-md-base-url>` when present.
	#[serde(skip)]
	pub base_url: String,
}

/// Highlighter settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct HighlightConfig {
	/// Add a line-number gutter to multi-line blocks.
	pub line_numbers: bool,
	/// Add a copy-to-clipboard button after each block.
	pub copy_button: bool,
	/// Label shown when the language is unknown.
	pub placeholder: String,
	/// Code blocks with this class are left alone (diagram sources).
	pub skip_class: String,
}

impl Default for HighlightConfig {
	fn default() -> Self {
		Self {
			line_numbers: true,
			copy_button: true,
			placeholder: "text".into(),
			skip_class: "language-mermaid".into(),
		}
	}
}

/// Search overlay settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
	/// Upper bound on rendered suggestions.
	pub max_suggestions: usize,
	/// Look-ahead/behind in pixels for the table-of-contents tracker.
	pub scroll_tolerance: f64,
	/// Class that hides the suggestion panel.
	pub hidden_class: String,
	/// Id of the inline JSON corpus element.
	pub corpus_id: String,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			max_suggestions: 5,
			scroll_tolerance: 20.0,
			hidden_class: "d-none".into(),
			corpus_id: "search-index".into(),
		}
	}
}

/// Graph viewer settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
	/// Location of the graph document relative to the viewer's script.
	pub data_path: String,
	/// Substring identifying the viewer's `<script src>`.
	pub script_marker: String,
	/// Container that receives the sidebar graph.
	pub sidebar_selector: String,
	/// Build-time disambiguation suffix stripped from names.
	pub name_suffix: String,
	/// Added to every node's `symbolSize`.
	pub symbol_size_boost: f64,
	/// Draw node labels in the sidebar graph.
	pub show_labels: bool,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			data_path: "../js/graph.json".into(),
			script_marker: "docsite-enhance".into(),
			sidebar_selector: ".md-sidebar--secondary".into(),
			name_suffix: " •".into(),
			symbol_size_boost: 5.0,
			show_labels: true,
		}
	}
}

impl Config {
	/// Parse a JSON config document.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Read the config from the page, falling back to defaults.
	pub fn from_document(document: &Document) -> Self {
		let mut config = match document.get_element_by_id(CONFIG_ELEMENT_ID) {
			Some(el) => {
				let text = el.text_content().unwrap_or_default();
				Self::from_json(&text).unwrap_or_else(|e| {
					warn!("ignoring page config: {e}");
					Self::default()
				})
			}
			None => Self::default(),
		};
		config.base_url = document
			.body()
			.and_then(|b| b.get_attribute("data-md-base-url"))
			.unwrap_or_default();
		debug!("config: {config:?}");
		config
	}
}
