//! Syntax highlighting for `pre code` blocks with a language label, a line-number gutter
//! and a copy button.

mod adapter;
mod highlighter;
pub mod language;

pub use adapter::{HighlightAdapter, copy_text, install_copy_handler};
pub use highlighter::{Annotation, Highlighted, Hljs, SyntaxHighlighter, annotate};

use crate::config::HighlightConfig;
use crate::error::Result;
use crate::page;

/// Highlight code blocks on every page view.
pub fn start(config: HighlightConfig) -> Result<()> {
	if config.copy_button {
		install_copy_handler(&page::document()?)?;
	}
	let adapter = HighlightAdapter::new(Hljs, config);
	page::on_page_ready(move || {
		let result = page::document().and_then(|doc| adapter.run(&doc).map(|_| ()));
		page::report("highlight", result);
	})
}
