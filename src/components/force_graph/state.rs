use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::options::ChartOptions;
use super::types::GraphData;

/// Extra pick distance around a node, in graph units.
pub const HIT_SLOP: f64 = 4.0;
/// Pointer travel (px) below which a press and release counts as a click.
const CLICK_SLOP: f64 = 3.0;
const MIN_RADIUS: f64 = 2.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: String,
	pub url: String,
	pub color: &'static str,
	pub radius: f64,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub options: ChartOptions,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, options: ChartOptions, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();
		let ring = 20.0 + 4.0 * data.nodes.len() as f64;

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (ring * angle.cos()) as f32,
				y: (ring * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.name.clone(),
					url: node.value.clone(),
					color: options.color(node.category),
					radius: (node.symbol_size / 2.0).max(MIN_RADIUS),
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) {
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}

		let k = options.clamp_scale(options.zoom);
		Self {
			graph,
			edges,
			options,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
		}
	}

	pub fn node_count(&self) -> usize {
		let mut count = 0;
		self.graph.visit_nodes(|_| count += 1);
		count
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius + HIT_SLOP {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_info(&self, idx: DefaultNodeIdx) -> Option<NodeInfo> {
		let mut info = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				info = Some(node.data.user_data.clone());
			}
		});
		info
	}

	/// Target URL of a clicked node; directory nodes have none.
	pub fn link_at(&self, idx: DefaultNodeIdx) -> Option<String> {
		self.node_info(idx)
			.map(|info| info.url)
			.filter(|url| !url.is_empty())
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the previous highlight around while it fades out.
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Pointer pressed at screen (`x`, `y`): grab the node under it or start panning.
	pub fn press(&mut self, x: f64, y: f64) {
		let Some(idx) = self.node_at_position(x, y) else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
			return;
		};
		let mut origin = (0.0, 0.0);
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				origin = (node.x(), node.y());
			}
		});
		self.drag = DragState {
			active: true,
			moved: false,
			node_idx: Some(idx),
			start_x: x,
			start_y: y,
			node_start_x: origin.0,
			node_start_y: origin.1,
		};
	}

	/// Pointer moved to screen (`x`, `y`).
	///
	/// A grabbed node only starts following once the pointer leaves the click slop; it stays
	/// pinned where it is dropped.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
			if self.pan.active {
				self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
				self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
			}
			return;
		}
		let (sx, sy) = (x - self.drag.start_x, y - self.drag.start_y);
		if !self.drag.moved && sx.hypot(sy) < CLICK_SLOP {
			return;
		}
		self.drag.moved = true;
		let Some(idx) = self.drag.node_idx else {
			return;
		};
		let k = self.transform.k;
		let (nx, ny) = (
			self.drag.node_start_x + (sx / k) as f32,
			self.drag.node_start_y + (sy / k) as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
				node.data.is_anchor = true;
			}
		});
	}

	/// Pointer released. Returns the link of a node that was clicked rather than dragged.
	pub fn release(&mut self) -> Option<String> {
		let clicked = match self.drag {
			DragState {
				active: true,
				moved: false,
				node_idx: Some(idx),
				..
			} => self.link_at(idx),
			_ => None,
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	/// Pointer left the canvas: drop any gesture and the hover.
	pub fn leave(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	/// Scale by `factor` around the screen point (`x`, `y`), within the scale limits.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = self.options.clamp_scale(self.transform.k * factor);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}
