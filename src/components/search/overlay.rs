use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, KeyboardEvent, Node, Window};

use super::index::{FlexSearchIndex, SearchDocument, TextIndex};
use super::keys::{KeyAction, move_focus};
use super::scroll_spy::{Section, active_section};
use super::suggest::{SuggestionPanel, collect_suggestions, panel_for};
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::page;

const ACTIVE_CLASS: &str = "active";

/// Rendered contents of the suggestion panel.
#[component]
pub fn SuggestionList(panel: RwSignal<SuggestionPanel>) -> impl IntoView {
	move || match panel.get() {
		SuggestionPanel::Empty => ().into_any(),
		SuggestionPanel::NoResults(query) => view! {
			<div class="suggestion__no-results">"No results for \"" <strong>{query}</strong> "\""</div>
		}
		.into_any(),
		SuggestionPanel::Results(suggestions) => suggestions
			.into_iter()
			.map(|s| {
				view! {
					<div>
						<a href=s.href>
							<span class="suggestion__title">{s.title}</span>
							<span class="suggestion__description">{s.description}</span>
						</a>
					</div>
				}
			})
			.collect_view()
			.into_any(),
	}
}

/// Parse the page's inline search corpus.
pub fn load_corpus(document: &Document, corpus_id: &str) -> Result<Vec<SearchDocument>> {
	let el = document
		.get_element_by_id(corpus_id)
		.ok_or_else(|| Error::MissingElement(format!("#{corpus_id}")))?;
	Ok(serde_json::from_str(&el.text_content().unwrap_or_default())?)
}

/// Search field, its suggestion panel and the index behind them.
pub struct SearchOverlay {
	input: HtmlInputElement,
	suggestions: HtmlElement,
	index: Box<dyn TextIndex>,
	panel: RwSignal<SuggestionPanel>,
	config: SearchConfig,
}

impl SearchOverlay {
	/// Wire the overlay to `#search` and `#suggestions`, backed by the page's FlexSearch.
	/// Returns `Ok(None)` when the page has no search box or no search library.
	pub fn mount(document: &Document, config: SearchConfig) -> Result<Option<Rc<Self>>> {
		if document.get_element_by_id("search").is_none() {
			debug!("no search box on this page");
			return Ok(None);
		}
		match FlexSearchIndex::new() {
			Ok(index) => Self::mount_with(document, config, Box::new(index)),
			Err(e) => {
				warn!("search disabled: {e}");
				Ok(None)
			}
		}
	}

	/// Like [`SearchOverlay::mount`], over any index.
	pub fn mount_with(
		document: &Document,
		config: SearchConfig,
		mut index: Box<dyn TextIndex>,
	) -> Result<Option<Rc<Self>>> {
		let (Some(input), Some(suggestions)) = (
			document.get_element_by_id("search"),
			document.get_element_by_id("suggestions"),
		) else {
			debug!("no search box on this page");
			return Ok(None);
		};
		let input: HtmlInputElement = input
			.dyn_into()
			.map_err(|_| Error::MissingElement("input#search".into()))?;
		let suggestions = page::as_html(suggestions)?;

		match load_corpus(document, &config.corpus_id) {
			Ok(docs) => {
				info!("indexing {} search documents", docs.len());
				docs.into_iter().for_each(|d| index.add(d));
			}
			Err(e) => warn!("search corpus unavailable: {e}"),
		}

		let panel = RwSignal::new(SuggestionPanel::Empty);
		leptos::mount::mount_to(suggestions.clone(), move || view! { <SuggestionList panel=panel /> })
			.forget();

		let overlay = Rc::new(Self {
			input,
			suggestions,
			index,
			panel,
			config,
		});
		overlay.listen(document)?;
		Ok(Some(overlay))
	}

	fn listen(self: &Rc<Self>, document: &Document) -> Result<()> {
		let this = self.clone();
		page::listen(&self.input, "input", move |_| this.show_results())?;

		let this = self.clone();
		let doc = document.clone();
		page::listen(document, "keydown", move |ev| {
			if let Some(ev) = ev.dyn_ref::<KeyboardEvent>() {
				this.on_key(&doc, ev);
			}
		})?;

		let this = self.clone();
		page::listen(document, "click", move |ev| {
			let inside = ev
				.target()
				.and_then(|t| t.dyn_into::<Node>().ok())
				.is_some_and(|node| this.suggestions.contains(Some(&node)));
			if !inside {
				this.hide();
			}
		})
	}

	/// Run the current query and render the panel.
	pub fn show_results(&self) {
		let query = self.input.value();
		let limit = self.config.max_suggestions;
		let suggestions = collect_suggestions(self.index.search(&query, limit), limit);
		debug!("query {query:?}: {} suggestions", suggestions.len());
		self.panel.set(panel_for(&query, suggestions));
		page::set_hidden(&self.suggestions, &self.config.hidden_class, false);
	}

	/// Hide the suggestion panel.
	pub fn hide(&self) {
		page::set_hidden(&self.suggestions, &self.config.hidden_class, true);
	}

	fn is_hidden(&self) -> bool {
		self.suggestions
			.class_list()
			.contains(&self.config.hidden_class)
	}

	fn on_key(&self, document: &Document, ev: &KeyboardEvent) {
		let Some(action) = KeyAction::from_key(&ev.key(), ev.ctrl_key()) else {
			return;
		};
		match action {
			KeyAction::FocusSearch => {
				ev.prevent_default();
				let _ = self.input.focus();
			}
			KeyAction::Dismiss => {
				let _ = self.input.blur();
				self.hide();
			}
			KeyAction::Previous | KeyAction::Next => {
				if self.is_hidden() {
					return;
				}
				let links = self.links();
				let active = document.active_element();
				let current = links
					.iter()
					.position(|a| active.as_ref().is_some_and(|el| a.is_same_node(Some(el))));
				if let Some(next) = move_focus(current, links.len(), action) {
					ev.prevent_default();
					let _ = links[next].focus();
				}
			}
		}
	}

	fn links(&self) -> Vec<HtmlElement> {
		let Ok(list) = self.suggestions.query_selector_all("a") else {
			return Vec::new();
		};
		(0..list.length())
			.filter_map(|i| list.item(i))
			.filter_map(|n| n.dyn_into::<HtmlElement>().ok())
			.collect()
	}
}

/// Table-of-contents anchors tracking the section in view.
pub struct ScrollSpy {
	anchors: Vec<Element>,
	tolerance: f64,
}

impl ScrollSpy {
	/// Track `#TableOfContents` links. Returns `Ok(None)` without a table of contents.
	pub fn mount(window: &Window, document: &Document, tolerance: f64) -> Result<Option<Rc<Self>>> {
		let Some(toc) = document.query_selector("#TableOfContents")? else {
			return Ok(None);
		};
		let list = toc.query_selector_all("a")?;
		let anchors: Vec<Element> = (0..list.length())
			.filter_map(|i| list.item(i))
			.filter_map(|n| n.dyn_into::<Element>().ok())
			.collect();
		if anchors.is_empty() {
			return Ok(None);
		}
		debug!("tracking {} table-of-contents entries", anchors.len());

		let spy = Rc::new(Self { anchors, tolerance });
		let (this, win, doc) = (spy.clone(), window.clone(), document.clone());
		page::listen(document, "scroll", move |_| this.update(&win, &doc))?;
		spy.update(window, document);
		Ok(Some(spy))
	}

	fn update(&self, window: &Window, document: &Document) {
		let targets: Vec<(usize, Section)> = self
			.anchors
			.iter()
			.enumerate()
			.filter_map(|(i, a)| Some((i, section_of(window, document, a)?)))
			.collect();
		let sections: Vec<Section> = targets.iter().map(|&(_, s)| s).collect();
		let scroll = window.scroll_y().unwrap_or(0.0);
		let active = active_section(&sections, scroll, self.tolerance).map(|k| targets[k].0);

		for (i, anchor) in self.anchors.iter().enumerate() {
			let classes = anchor.class_list();
			let _ = if Some(i) == active {
				classes.add_1(ACTIVE_CLASS)
			} else {
				classes.remove_1(ACTIVE_CLASS)
			};
		}
	}
}

fn section_of(window: &Window, document: &Document, anchor: &Element) -> Option<Section> {
	let href = anchor.get_attribute("href")?;
	let id = href.strip_prefix('#')?;
	let id = js_sys::decode_uri_component(id)
		.map(String::from)
		.unwrap_or_else(|_| id.to_owned());
	let target = document.get_element_by_id(&id)?;
	Some(Section {
		top: page::offset_top(window, &target),
		height: target.get_bounding_client_rect().height(),
	})
}
