//! Session-scoped view model of the graph viewer.
//!
//! Owns the loaded graph and the chart options for the lifetime of the page session and
//! decides what each page view should show. All DOM work lives in the viewer; this type
//! only tracks state.

use std::sync::Arc;

use log::debug;

use super::filter::ego_network;
use super::options::ChartOptions;
use super::types::GraphData;

#[derive(Clone, Debug, Default)]
enum Load {
	#[default]
	Idle,
	Loading,
	Ready {
		graph: Arc<GraphData>,
		options: ChartOptions,
	},
}

/// Observable phase of the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Uninitialized,
	Loading,
	Ready,
	ModalOpen,
}

/// A graph together with the options to draw it with.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartView {
	pub graph: Arc<GraphData>,
	pub options: ChartOptions,
}

/// What the sidebar should do on a page view.
#[derive(Clone, Debug, PartialEq)]
pub enum SidebarAction {
	/// Start the one fetch of the session.
	Fetch,
	/// A fetch is already in flight.
	ShowLoading,
	Render(ChartView),
}

/// What the modal should show when opened.
#[derive(Clone, Debug, PartialEq)]
pub enum ModalView {
	Loading,
	Full(ChartView),
}

#[derive(Debug, Default)]
pub struct GraphSession {
	load: Load,
	modal_open: bool,
	base_options: ChartOptions,
}

impl GraphSession {
	pub fn new(base_options: ChartOptions) -> Self {
		Self {
			base_options,
			..Self::default()
		}
	}

	pub fn phase(&self) -> Phase {
		match (&self.load, self.modal_open) {
			(_, true) => Phase::ModalOpen,
			(Load::Idle, _) => Phase::Uninitialized,
			(Load::Loading, _) => Phase::Loading,
			(Load::Ready { .. }, _) => Phase::Ready,
		}
	}

	/// A page was (re)displayed at `path`.
	pub fn page_ready(&mut self, path: &str) -> SidebarAction {
		self.modal_open = false;
		match self.load {
			Load::Idle => {
				self.load = Load::Loading;
				SidebarAction::Fetch
			}
			Load::Loading => SidebarAction::ShowLoading,
			Load::Ready { .. } => match self.sidebar_view(path) {
				Some(view) => SidebarAction::Render(view),
				None => SidebarAction::ShowLoading,
			},
		}
	}

	/// Graph data arrived. Options are built here, once.
	pub fn loaded(&mut self, graph: GraphData, background: Option<String>) {
		let mut options = self.base_options.clone();
		if let Some(bg) = background {
			options.background = bg;
		}
		debug!(
			"graph ready: {} nodes, {} links",
			graph.nodes.len(),
			graph.links.len()
		);
		self.load = Load::Ready {
			graph: Arc::new(graph),
			options,
		};
	}

	/// The fetch failed; a later page view may try again.
	pub fn failed(&mut self) {
		self.load = Load::Idle;
	}

	/// Filtered view for the sidebar, `None` until data is loaded.
	pub fn sidebar_view(&self, path: &str) -> Option<ChartView> {
		let Load::Ready { graph, options } = &self.load else {
			return None;
		};
		Some(ChartView {
			graph: Arc::new(ego_network(graph, path)),
			options: options.sidebar(),
		})
	}

	pub fn open_modal(&mut self) -> ModalView {
		self.modal_open = true;
		match &self.load {
			Load::Ready { graph, options } => ModalView::Full(ChartView {
				graph: graph.clone(),
				options: options.modal(),
			}),
			_ => ModalView::Loading,
		}
	}

	/// Leave the modal; returns the sidebar view to restore.
	pub fn close_modal(&mut self, path: &str) -> Option<ChartView> {
		self.modal_open = false;
		self.sidebar_view(path)
	}

	/// Forget an open modal without restoring anything (the page went away under it).
	pub fn dismiss_modal(&mut self) {
		self.modal_open = false;
	}

	pub fn is_modal_open(&self) -> bool {
		self.modal_open
	}

	/// The page palette changed.
	pub fn set_background(&mut self, background: String) {
		if let Load::Ready { options, .. } = &mut self.load {
			options.background = background;
		}
	}
}
