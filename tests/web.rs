//! Browser tests for the DOM-facing parts.

#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use docsite_enhance::Config;
use docsite_enhance::components::force_graph::{
	GraphViewer, Phase, SharedViewer, open_modal, page_view, script_src,
};
use docsite_enhance::components::highlight::{
	HighlightAdapter, Highlighted, SyntaxHighlighter, copy_text,
};
use docsite_enhance::components::search::{
	Field, FieldHits, ScrollSpy, SearchDocument, SearchOverlay, TextIndex,
};
use docsite_enhance::config::{GraphConfig, HighlightConfig, SearchConfig};
use docsite_enhance::page;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

/// Wraps the code untouched and reports the requested language, or python.
struct Wrap;

impl SyntaxHighlighter for Wrap {
	fn highlight(&self, code: &str, language: Option<&str>) -> Option<Highlighted> {
		Some(Highlighted {
			language: language.map(str::to_owned).or(Some("python".into())),
			markup: format!("<b>{code}</b>"),
		})
	}
}

/// Case-insensitive title substring match.
#[derive(Default)]
struct TitleIndex(Vec<SearchDocument>);

impl TextIndex for TitleIndex {
	fn add(&mut self, doc: SearchDocument) {
		self.0.push(doc);
	}

	fn search(&self, query: &str, limit: usize) -> Vec<FieldHits> {
		let query = query.to_lowercase();
		let docs: Vec<_> = self
			.0
			.iter()
			.filter(|d| !query.is_empty() && d.title.to_lowercase().contains(&query))
			.take(limit)
			.cloned()
			.collect();
		if docs.is_empty() {
			return Vec::new();
		}
		vec![FieldHits {
			field: Field::Title,
			docs,
		}]
	}
}

fn fixture(document: &Document, html: &str) -> Element {
	let root = document.create_element("div").unwrap();
	root.set_inner_html(html);
	document.body().unwrap().append_child(&root).unwrap();
	root
}

fn text_of(root: &Element, selector: &str) -> Vec<String> {
	let list = root.query_selector_all(selector).unwrap();
	(0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|n| n.text_content())
		.collect()
}

fn by_id(document: &Document, id: &str) -> Element {
	document.get_element_by_id(id).unwrap()
}

async fn sleep(ms: i32) {
	let promise = js_sys::Promise::new(&mut |resolve, _| {
		page::window()
			.unwrap()
			.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
			.unwrap();
	});
	JsFuture::from(promise).await.unwrap();
}

const CODE_PAGE: &str = r#"<pre><code class="language-sh">echo hi
echo there</code></pre>
<pre><code class="language-klingon">qapla</code></pre>
<pre><code class="language-mermaid">graph TD</code></pre>"#;

#[wasm_bindgen_test]
fn highlights_each_block_once() {
	let document = page::document().unwrap();
	let root = fixture(&document, CODE_PAGE);
	let adapter = HighlightAdapter::new(Wrap, HighlightConfig::default());

	assert_eq!(adapter.run(&document).unwrap(), 2);
	assert_eq!(text_of(&root, "label.language"), vec!["bash", "text"]);
	assert_eq!(text_of(&root, "span.line-numbers").len(), 1);
	assert_eq!(text_of(&root, "button.copy-code").len(), 2);
	assert_eq!(text_of(&root, "code b"), vec!["echo hi\necho there"]);

	assert_eq!(adapter.run(&document).unwrap(), 0);
	assert_eq!(text_of(&root, "label.language").len(), 2);
	root.remove();
}

#[wasm_bindgen_test]
fn copy_button_resolves_its_own_block() {
	let document = page::document().unwrap();
	let root = fixture(&document, CODE_PAGE);
	HighlightAdapter::new(Wrap, HighlightConfig::default())
		.run(&document)
		.unwrap();

	let buttons = root.query_selector_all("button.copy-code").unwrap();
	let first: Element = buttons.item(0).unwrap().dyn_into().unwrap();
	let second: Element = buttons.item(1).unwrap().dyn_into().unwrap();
	assert_eq!(copy_text(&first).as_deref(), Some("echo hi\necho there"));
	assert_eq!(copy_text(&second).as_deref(), Some("qapla"));
	assert_eq!(copy_text(&root), None);
	root.remove();
}

#[wasm_bindgen_test]
fn reads_inline_config() {
	let document = page::document().unwrap();
	let root = fixture(
		&document,
		r#"<script type="application/json" id="docsite-config">{"search": {"max_suggestions": 3}}</script>"#,
	);
	let config = Config::from_document(&document);
	assert_eq!(config.search.max_suggestions, 3);
	assert!(config.highlight.copy_button);
	root.remove();
}

#[wasm_bindgen_test]
fn malformed_config_falls_back_to_defaults() {
	let document = page::document().unwrap();
	let root = fixture(
		&document,
		r#"<script type="application/json" id="docsite-config">{not json</script>"#,
	);
	assert_eq!(Config::from_document(&document).search.max_suggestions, 5);
	root.remove();
}

const SEARCH_PAGE: &str = r#"<input id="search" type="search">
<div id="suggestions" class="d-none"></div>
<script type="application/json" id="search-index">[
	{"id": 0, "href": "/a/", "title": "Graph basics", "description": null},
	{"id": 1, "href": "/b/", "title": "Graph layout", "description": "Forces"},
	{"id": 2, "href": "/c/", "title": "Graph colours", "description": "Palette"}
]</script>"#;

fn mount_search(document: &Document) -> Rc<SearchOverlay> {
	SearchOverlay::mount_with(document, SearchConfig::default(), Box::new(TitleIndex::default()))
		.unwrap()
		.unwrap()
}

async fn type_query(document: &Document, query: &str) {
	let input: web_sys::HtmlInputElement = by_id(document, "search").dyn_into().unwrap();
	input.set_value(query);
	input.dispatch_event(&Event::new("input").unwrap()).unwrap();
	sleep(20).await;
}

fn press(document: &Document, key: &str) {
	let init = KeyboardEventInit::new();
	init.set_key(key);
	let ev = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
	document.dispatch_event(&ev).unwrap();
}

fn focused_link(document: &Document) -> Option<usize> {
	let links = by_id(document, "suggestions").query_selector_all("a").unwrap();
	let active = document.active_element()?;
	(0..links.length()).position(|i| {
		links
			.item(i)
			.is_some_and(|link| link.is_same_node(Some(&active)))
	})
}

#[wasm_bindgen_test]
async fn unmatched_query_shows_a_single_message() {
	let document = page::document().unwrap();
	let root = fixture(&document, SEARCH_PAGE);
	mount_search(&document);

	type_query(&document, "xyz123").await;
	let suggestions = by_id(&document, "suggestions");
	assert_eq!(
		text_of(&suggestions, ".suggestion__no-results"),
		vec!["No results for \"xyz123\""]
	);
	assert!(!suggestions.class_list().contains("d-none"));
	assert_eq!(text_of(&suggestions, "a").len(), 0);
	root.remove();
}

#[wasm_bindgen_test]
async fn click_outside_hides_suggestions() {
	let document = page::document().unwrap();
	let root = fixture(&document, SEARCH_PAGE);
	mount_search(&document);

	type_query(&document, "graph").await;
	let suggestions: HtmlElement = by_id(&document, "suggestions").dyn_into().unwrap();
	assert_eq!(text_of(&suggestions, ".suggestion__title").len(), 3);

	suggestions.click();
	assert!(!suggestions.class_list().contains("d-none"));
	document.body().unwrap().click();
	assert!(suggestions.class_list().contains("d-none"));
	root.remove();
}

#[wasm_bindgen_test]
async fn arrow_keys_move_focus_without_wrapping() {
	let document = page::document().unwrap();
	let root = fixture(&document, SEARCH_PAGE);
	mount_search(&document);

	type_query(&document, "graph").await;
	assert_eq!(focused_link(&document), None);
	press(&document, "ArrowDown");
	assert_eq!(focused_link(&document), Some(0));
	for _ in 0..3 {
		press(&document, "ArrowDown");
	}
	assert_eq!(focused_link(&document), Some(2));
	for _ in 0..4 {
		press(&document, "ArrowUp");
	}
	assert_eq!(focused_link(&document), Some(0));

	press(&document, "Escape");
	assert!(by_id(&document, "suggestions").class_list().contains("d-none"));
	root.remove();
}

#[wasm_bindgen_test]
fn scroll_spy_marks_exactly_one_entry() {
	let (window, document) = (page::window().unwrap(), page::document().unwrap());
	let root = fixture(
		&document,
		r##"<nav id="TableOfContents">
	<a href="#spy-a">A</a><a href="#spy-b">B</a><a href="#spy-c">C</a>
</nav>
<section id="spy-a" style="height: 1000px"></section>
<section id="spy-b" style="height: 1000px"></section>
<section id="spy-c" style="height: 1000px"></section>"##,
	);
	ScrollSpy::mount(&window, &document, 20.0).unwrap().unwrap();

	let top_b = page::offset_top(&window, &by_id(&document, "spy-b"));
	window.scroll_to_with_x_and_y(0.0, top_b + 10.0);
	document.dispatch_event(&Event::new("scroll").unwrap()).unwrap();
	assert_eq!(text_of(&root, "#TableOfContents a.active"), vec!["B"]);

	let top_c = page::offset_top(&window, &by_id(&document, "spy-c"));
	window.scroll_to_with_x_and_y(0.0, top_c - 10.0);
	document.dispatch_event(&Event::new("scroll").unwrap()).unwrap();
	assert_eq!(text_of(&root, "#TableOfContents a.active"), vec!["C"]);

	window.scroll_to_with_x_and_y(0.0, 0.0);
	root.remove();
}

const GRAPH_PAGE: &str =
	r#"<div class="md-search"></div><div class="md-sidebar--secondary"></div>"#;

fn graph_config(data_path: String) -> Config {
	let mut config = Config::default();
	config.graph.data_path = data_path;
	config
}

/// Inline graph where node 2 is the current page and links only to node 1.
fn graph_data_for(path: &str) -> String {
	let json = format!(
		r#"{{
			"nodes": [
				{{"id": "1", "name": "One", "symbolSize": 4, "value": "/one/"}},
				{{"id": "2", "name": "Here •", "symbolSize": 4, "value": "{path}"}},
				{{"id": "3", "name": "Three", "symbolSize": 4, "value": "/three/"}}
			],
			"links": [{{"source": "1", "target": "2"}}]
		}}"#
	);
	format!(
		"data:application/json,{}",
		String::from(js_sys::encode_uri_component(&json))
	)
}

async fn settles_in(viewer: &SharedViewer, phase: Phase) -> bool {
	for _ in 0..100 {
		if viewer.borrow().phase() == phase {
			return true;
		}
		sleep(20).await;
	}
	false
}

#[wasm_bindgen_test]
async fn graph_loads_once_and_modal_restores_sidebar() {
	let (window, document) = (page::window().unwrap(), page::document().unwrap());
	assert!(document.get_element_by_id("search").is_none());
	let root = fixture(&document, GRAPH_PAGE);
	let path = window.location().pathname().unwrap();
	let viewer = GraphViewer::shared(&graph_config(graph_data_for(&path)));

	page_view(&viewer).unwrap();
	assert_eq!(viewer.borrow().fetches(), 1);
	assert_eq!(viewer.borrow().phase(), Phase::Loading);
	assert!(settles_in(&viewer, Phase::Ready).await);
	assert!(root.query_selector(".md-sidebar--secondary #graph canvas").unwrap().is_some());
	assert!(document.get_element_by_id("graph_button").is_some());

	open_modal(&viewer).unwrap();
	assert_eq!(viewer.borrow().phase(), Phase::ModalOpen);
	let backdrop = by_id(&document, "modal_background");
	assert!(backdrop.query_selector("#graph canvas").unwrap().is_some());
	assert!(root.query_selector(".md-sidebar--secondary #graph").unwrap().is_none());

	backdrop.dyn_into::<HtmlElement>().unwrap().click();
	assert!(document.get_element_by_id("modal_background").is_none());
	assert_eq!(viewer.borrow().phase(), Phase::Ready);
	assert!(root.query_selector(".md-sidebar--secondary #graph canvas").unwrap().is_some());

	page_view(&viewer).unwrap();
	assert_eq!(viewer.borrow().fetches(), 1);
	root.remove();
}

#[wasm_bindgen_test]
async fn failed_fetch_shows_inline_error_and_retries_on_next_view() {
	let document = page::document().unwrap();
	let root = fixture(&document, GRAPH_PAGE);
	let viewer = GraphViewer::shared(&graph_config("missing/graph.json".into()));

	page_view(&viewer).unwrap();
	assert!(settles_in(&viewer, Phase::Uninitialized).await);
	let mount = root.query_selector(".md-sidebar--secondary #graph").unwrap().unwrap();
	assert!(mount.text_content().unwrap().contains("Error loading graph data"));

	page_view(&viewer).unwrap();
	assert_eq!(viewer.borrow().fetches(), 2);
	root.remove();
}

#[wasm_bindgen_test]
fn finds_bundled_module_through_modulepreload() {
	let document = page::document().unwrap();
	let root = fixture(
		&document,
		r#"<link rel="modulepreload" href="/site/docsite-enhance-3f9a1c.js">"#,
	);
	assert_eq!(
		script_src(&document, &GraphConfig::default().script_marker).as_deref(),
		Some("/site/docsite-enhance-3f9a1c.js")
	);
	root.remove();
}
