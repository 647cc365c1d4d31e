use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use super::highlighter::{SyntaxHighlighter, annotate, gutter_text};
use super::language::hint_from_classes;
use crate::config::HighlightConfig;
use crate::error::Result;
use crate::page;

const PROCESSED_ATTR: &str = "data-highlighted";
const COPY_BUTTON: &str = "button.copy-code";

#[wasm_bindgen]
extern "C" {
	#[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = writeText, catch)]
	fn clipboard_write_text(text: &str) -> std::result::Result<js_sys::Promise, JsValue>;
}

/// Source text of the code block whose copy button contains `target`.
pub fn copy_text(target: &Element) -> Option<String> {
	let button = target.closest(COPY_BUTTON).ok()??;
	let block = button.closest("pre").ok()??;
	block.query_selector("code").ok()??.text_content()
}

/// One document-level listener serving every copy button, present and future.
pub fn install_copy_handler(document: &Document) -> Result<()> {
	page::listen(document, "click", |ev| {
		let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
			return;
		};
		if let Some(code) = copy_text(&target) {
			if let Err(e) = clipboard_write_text(&code) {
				warn!("clipboard unavailable: {e:?}");
			}
		}
	})
}

/// Highlights every unprocessed code block below `root`.
pub struct HighlightAdapter<H> {
	highlighter: H,
	config: HighlightConfig,
}

impl<H: SyntaxHighlighter> HighlightAdapter<H> {
	pub fn new(highlighter: H, config: HighlightConfig) -> Self {
		Self {
			highlighter,
			config,
		}
	}

	/// Process all `pre code` blocks in the document. Returns how many were touched.
	pub fn run(&self, document: &Document) -> Result<usize> {
		let blocks = document.query_selector_all("pre code")?;
		let mut done = 0;
		for i in 0..blocks.length() {
			let Some(block) = blocks.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
				continue;
			};
			if block.has_attribute(PROCESSED_ATTR)
				|| block.class_list().contains(&self.config.skip_class)
			{
				continue;
			}
			match self.apply(document, &block) {
				Ok(()) => done += 1,
				Err(e) => warn!("failed to highlight code block: {e}"),
			}
		}
		if done > 0 {
			info!("highlighted {done} code blocks");
		}
		Ok(done)
	}

	fn apply(&self, document: &Document, block: &Element) -> Result<()> {
		let code = block.text_content().unwrap_or_default();
		let class_name = block.class_name();
		let hint = hint_from_classes(&class_name);
		let annotation = annotate(&code, hint, &self.highlighter, &self.config.placeholder);
		debug!("code block {hint:?} -> {}", annotation.label);

		if let Some(markup) = &annotation.markup {
			block.set_inner_html(markup);
			block.class_list().add_1("hljs")?;
		}
		block.set_attribute(PROCESSED_ATTR, "")?;

		if self.config.line_numbers && annotation.lines > 1 {
			let gutter = document.create_element("span")?;
			gutter.set_class_name("line-numbers");
			gutter.set_attribute("aria-hidden", "true")?;
			gutter.set_text_content(Some(&gutter_text(annotation.lines)));
			block.before_with_node_1(&gutter)?;
		}

		let label = document.create_element("label")?;
		label.set_class_name("language");
		label.set_text_content(Some(&annotation.label));
		block.after_with_node_1(&label)?;

		if self.config.copy_button {
			let button = document.create_element("button")?;
			button.set_class_name("copy-code");
			button.set_attribute("type", "button")?;
			button.set_attribute("title", "Copy to clipboard")?;
			button.set_text_content(Some("Copy"));
			label.after_with_node_1(&button)?;
		}
		Ok(())
	}
}
