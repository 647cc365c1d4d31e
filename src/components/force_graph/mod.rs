//! Link graph of the documentation site.
//!
//! The sidebar shows the neighbourhood of the current page; the header button opens the
//! whole graph in a modal. Data is fetched once per session.

mod component;
mod filter;
mod options;
mod render;
mod session;
mod source;
mod state;
mod types;
mod viewer;

pub use component::ForceGraphCanvas;
pub use filter::ego_network;
pub use options::{ChartOptions, DEFAULT_BACKGROUND, PALETTE};
pub use session::{ChartView, GraphSession, ModalView, Phase, SidebarAction};
pub use source::{graph_data_url, script_src};
pub use types::{Category, GraphData, GraphLink, GraphNode};
pub use viewer::{GraphViewer, SharedViewer, close_modal, open_modal, page_view, start};
