use std::cell::RefCell;
use std::rc::Rc;

use leptos::mount::{UnmountHandle, mount_to};
use leptos::prelude::*;
use leptos::tachys::view::any_view::AnyViewState;
use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement};

use super::ForceGraphCanvas;
use super::options::ChartOptions;
use super::session::{ChartView, GraphSession, ModalView, Phase, SidebarAction};
use super::source::{fetch_graph, graph_data_url, script_src};
use crate::config::{Config, GraphConfig};
use crate::error::{Error, Result};
use crate::page;

const MOUNT_ID: &str = "graph";
const BUTTON_ID: &str = "graph_button";
const BACKDROP_ID: &str = "modal_background";
const PALETTE_TOGGLES: &str = "#__palette_0, #__palette_1";
const LOADING_HTML: &str = r#"<p class="graph-message">Graph data loading...</p>"#;
const ERROR_HTML: &str =
	r#"<p class="graph-error" style="color:red;text-align:center;">Error loading graph data. Check console.</p>"#;
const BUTTON_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M19 16a3 3 0 0 0-2.4 1.2l-5.2-2.6a3 3 0 0 0 0-1.2l5.2-2.6A3 3 0 1 0 16 9c0 .2 0 .4.1.6l-5.2 2.6a3 3 0 1 0 0 3.6l5.2 2.6A3 3 0 1 0 19 16z"/></svg>"#;

type ChartHandle = UnmountHandle<AnyViewState>;

struct Backdrop {
	element: Element,
	_on_click: Closure<dyn FnMut(Event)>,
}

/// Owns the session and the live chart instances. At most one chart exists at a time.
pub struct GraphViewer {
	session: GraphSession,
	config: GraphConfig,
	base_url: String,
	sidebar: Option<ChartHandle>,
	modal: Option<ChartHandle>,
	backdrop: Option<Backdrop>,
	fetches: usize,
}

/// A viewer as shared with its event listeners.
pub type SharedViewer = Rc<RefCell<GraphViewer>>;

fn navigate(url: String) {
	if let Some(window) = web_sys::window() {
		if let Err(e) = window.location().set_href(&url) {
			error!("navigation to {url} failed: {e:?}");
		}
	}
}

fn mount_chart(parent: HtmlElement, chart: ChartView, fullscreen: bool) -> ChartHandle {
	parent.set_inner_html("");
	let ChartView { graph, options } = chart;
	mount_to(parent, move || {
		view! {
			<ForceGraphCanvas
				data=Signal::stored(graph)
				options=options
				fullscreen=fullscreen
				on_node_click=Callback::new(navigate)
			/>
		}
		.into_any()
	})
}

fn lock_scroll(document: &Document, locked: bool) {
	let Some(body) = document.body() else {
		return;
	};
	let style = body.style();
	let (overflow, position) = if locked { ("hidden", "fixed") } else { ("", "") };
	let _ = style.set_property("overflow", overflow);
	let _ = style.set_property("position", position);
}

fn current_path() -> Result<String> {
	Ok(page::window()?.location().pathname()?)
}

impl GraphViewer {
	pub fn new(config: &Config) -> Self {
		let base_options = ChartOptions {
			show_labels: config.graph.show_labels,
			..ChartOptions::default()
		};
		Self {
			session: GraphSession::new(base_options),
			config: config.graph.clone(),
			base_url: config.base_url.clone(),
			sidebar: None,
			modal: None,
			backdrop: None,
			fetches: 0,
		}
	}

	/// A fresh viewer ready to hand to [`page_view`].
	pub fn shared(config: &Config) -> SharedViewer {
		Rc::new(RefCell::new(Self::new(config)))
	}

	/// Current phase of the session.
	pub fn phase(&self) -> Phase {
		self.session.phase()
	}

	/// Graph fetches started so far.
	pub fn fetches(&self) -> usize {
		self.fetches
	}

	/// Replace the sidebar's `#graph` element with a fresh one.
	fn sidebar_mount(&self, document: &Document) -> Result<Option<HtmlElement>> {
		let Some(container) = document.query_selector(&self.config.sidebar_selector)? else {
			return Ok(None);
		};
		if let Some(old) = container.query_selector(&format!("#{MOUNT_ID}"))? {
			old.remove();
		}
		let mount = document.create_element("div")?;
		mount.set_id(MOUNT_ID);
		mount.set_class_name("graph");
		container.append_child(&mount)?;
		Ok(Some(page::as_html(mount)?))
	}

	fn render_sidebar(&mut self, document: &Document, chart: Option<ChartView>) -> Result<()> {
		self.sidebar.take();
		let Some(mount) = self.sidebar_mount(document)? else {
			return Ok(());
		};
		match chart {
			Some(chart) => self.sidebar = Some(mount_chart(mount, chart, false)),
			None => mount.set_inner_html(LOADING_HTML),
		}
		Ok(())
	}

	fn remove_backdrop(&mut self, document: &Document) {
		self.modal.take();
		if let Some(backdrop) = self.backdrop.take() {
			backdrop.element.remove();
		}
		lock_scroll(document, false);
	}
}

/// Handle one page view.
pub fn page_view(shared: &SharedViewer) -> Result<()> {
	let (window, document) = (page::window()?, page::document()?);
	let mut viewer = shared.borrow_mut();
	viewer.sidebar.take();
	viewer.remove_backdrop(&document);
	viewer.session.dismiss_modal();

	if document.query_selector(&viewer.config.sidebar_selector)?.is_none() {
		debug!("no sidebar for the graph on this page");
		return Ok(());
	}
	drop(viewer);
	install_controls(shared, &document)?;
	let mut viewer = shared.borrow_mut();

	let path = window.location().pathname()?;
	match viewer.session.page_ready(&path) {
		SidebarAction::Fetch => {
			viewer.render_sidebar(&document, None)?;
			let script = script_src(&document, &viewer.config.script_marker);
			let href = window.location().href()?;
			let url = graph_data_url(
				script.as_deref(),
				&href,
				&viewer.base_url,
				&viewer.config.data_path,
			);
			viewer.fetches += 1;
			drop(viewer);
			wasm_bindgen_futures::spawn_local(load(shared.clone(), url));
		}
		SidebarAction::ShowLoading => viewer.render_sidebar(&document, None)?,
		SidebarAction::Render(chart) => viewer.render_sidebar(&document, Some(chart))?,
	}
	Ok(())
}

async fn load(shared: SharedViewer, url: String) {
	let result = fetch_graph(&url).await;
	let outcome = (|| -> Result<()> {
		let (window, document) = (page::window()?, page::document()?);
		let mut viewer = shared.borrow_mut();
		match result {
			Ok(mut graph) => {
				graph.normalize(&viewer.config.name_suffix, viewer.config.symbol_size_boost);
				info!("loaded graph with {} nodes from {url}", graph.nodes.len());
				viewer
					.session
					.loaded(graph, page::body_background(&window, &document));
				if viewer.session.is_modal_open() {
					refresh_modal(&mut viewer, &document)?;
				} else if document.get_element_by_id(MOUNT_ID).is_some() {
					let chart = viewer.session.sidebar_view(&current_path()?);
					viewer.render_sidebar(&document, chart)?;
				}
				Ok(())
			}
			Err(e) => {
				error!("failed to load graph data: {e}");
				error!("attempted url: {url}");
				viewer.session.failed();
				if let Some(mount) = document.get_element_by_id(MOUNT_ID) {
					mount.set_inner_html(ERROR_HTML);
				}
				Ok(())
			}
		}
	})();
	page::report("graph", outcome);
}

fn refresh_modal(viewer: &mut GraphViewer, document: &Document) -> Result<()> {
	let Some(mount) = document.get_element_by_id(MOUNT_ID) else {
		return Ok(());
	};
	if let ModalView::Full(chart) = viewer.session.open_modal() {
		viewer.modal.take();
		viewer.modal = Some(mount_chart(page::as_html(mount)?, chart, true));
	}
	Ok(())
}

/// Header button and palette listeners, added once per document.
fn install_controls(shared: &SharedViewer, document: &Document) -> Result<()> {
	if document.get_element_by_id(BUTTON_ID).is_some() {
		return Ok(());
	}
	let Some(search) = document.query_selector(".md-search")? else {
		debug!("no header search box; graph button skipped");
		return Ok(());
	};

	let form = document.create_element("form")?;
	form.set_class_name("md-header__option");
	let button = document.create_element("label")?;
	button.set_id(BUTTON_ID);
	button.set_class_name("md-header__button md-icon");
	button.set_inner_html(BUTTON_ICON);
	form.append_child(&button)?;
	search.before_with_node_1(&form)?;

	let this = shared.clone();
	page::listen(&button, "click", move |_| page::report("graph modal", open_modal(&this)))?;

	let toggles = document.query_selector_all(PALETTE_TOGGLES)?;
	for i in 0..toggles.length() {
		let Some(toggle) = toggles.item(i) else {
			continue;
		};
		let this = shared.clone();
		page::listen(&toggle, "change", move |_| {
			page::report("graph palette", palette_changed(&this))
		})?;
	}
	Ok(())
}

/// Show the whole graph full screen.
pub fn open_modal(shared: &SharedViewer) -> Result<()> {
	let document = page::document()?;
	let mut viewer = shared.borrow_mut();
	if viewer.session.is_modal_open() {
		return Ok(());
	}
	let body = document
		.body()
		.ok_or_else(|| Error::MissingElement("body".into()))?;
	lock_scroll(&document, true);
	viewer.sidebar.take();
	if let Some(old) = document.get_element_by_id(MOUNT_ID) {
		old.remove();
	}

	let backdrop = document.create_element("div")?;
	backdrop.set_id(BACKDROP_ID);
	let mount = document.create_element("div")?;
	mount.set_id(MOUNT_ID);
	mount.set_class_name("modal_graph");
	backdrop.append_child(&mount)?;
	body.append_child(&backdrop)?;

	let this = shared.clone();
	let target = backdrop.clone();
	let on_click = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
		let on_backdrop = ev
			.target()
			.and_then(|t| t.dyn_into::<web_sys::Node>().ok())
			.is_some_and(|node| target.is_same_node(Some(&node)));
		if on_backdrop {
			page::report("graph modal", close_modal(&this));
		}
	});
	backdrop.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
	viewer.backdrop = Some(Backdrop {
		element: backdrop,
		_on_click: on_click,
	});

	let mount = page::as_html(mount)?;
	match viewer.session.open_modal() {
		ModalView::Full(chart) => viewer.modal = Some(mount_chart(mount, chart, true)),
		ModalView::Loading => mount.set_inner_html(LOADING_HTML),
	}
	Ok(())
}

/// Leave the full-screen view and restore the sidebar.
pub fn close_modal(shared: &SharedViewer) -> Result<()> {
	let document = page::document()?;
	let mut viewer = shared.borrow_mut();
	viewer.remove_backdrop(&document);
	let chart = viewer.session.close_modal(&current_path()?);
	viewer.render_sidebar(&document, chart)
}

fn palette_changed(shared: &SharedViewer) -> Result<()> {
	let (window, document) = (page::window()?, page::document()?);
	let mut viewer = shared.borrow_mut();
	let Some(background) = page::body_background(&window, &document) else {
		return Ok(());
	};
	viewer.session.set_background(background);
	if viewer.session.is_modal_open() {
		return refresh_modal(&mut viewer, &document);
	}
	if let Some(chart) = viewer.session.sidebar_view(&current_path()?) {
		viewer.render_sidebar(&document, Some(chart))?;
	}
	Ok(())
}

/// Show the link graph in the sidebar on every page view.
pub fn start(config: &Config) -> Result<()> {
	let shared = GraphViewer::shared(config);
	page::on_page_ready(move || page::report("graph", page_view(&shared)))
}
