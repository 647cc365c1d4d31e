//! Search suggestions over an inline corpus, keyboard navigation of the results, and
//! table-of-contents tracking while scrolling.

pub mod index;
mod keys;
mod overlay;
mod scroll_spy;
mod suggest;

pub use index::{Field, FieldHits, FlexSearchIndex, SearchDocument, TextIndex, decode_hits};
pub use keys::{KeyAction, move_focus};
pub use overlay::{ScrollSpy, SearchOverlay, SuggestionList, load_corpus};
pub use scroll_spy::{Section, active_section};
pub use suggest::{Suggestion, SuggestionPanel, collect_suggestions, panel_for};

use log::info;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::page;

/// Set up the search overlay and the table-of-contents tracker once the document is parsed.
pub fn start(config: SearchConfig) -> Result<()> {
	page::on_document_ready(move || page::report("search", mount(config)))
}

fn mount(config: SearchConfig) -> Result<()> {
	let (window, document) = (page::window()?, page::document()?);
	ScrollSpy::mount(&window, &document, config.scroll_tolerance)?;
	if SearchOverlay::mount(&document, config)?.is_some() {
		info!("search overlay ready");
	}
	Ok(())
}
