use std::collections::HashSet;

use super::types::GraphData;

/// The page's node together with its direct neighbours and the links touching it.
///
/// Empty when no node's URL equals `path`. Only one hop is followed.
pub fn ego_network(graph: &GraphData, path: &str) -> GraphData {
	let Some(center) = graph.nodes.iter().find(|n| n.value == path) else {
		return GraphData::default();
	};
	let links: Vec<_> = graph
		.links
		.iter()
		.filter(|l| l.source == center.id || l.target == center.id)
		.cloned()
		.collect();
	let ids: HashSet<&str> = links
		.iter()
		.flat_map(|l| [l.source.as_str(), l.target.as_str()])
		.collect();
	let nodes = graph
		.nodes
		.iter()
		.filter(|n| ids.contains(n.id.as_str()))
		.cloned()
		.collect();

	GraphData {
		nodes,
		links,
		categories: graph.categories.clone(),
	}
}
