use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub name: String,
	/// Page URL; empty for directory nodes.
	#[serde(default)]
	pub value: String,
	#[serde(rename = "symbolSize", default)]
	pub symbol_size: f64,
	#[serde(default)]
	pub category: Option<usize>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Category {
	pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
	#[serde(default)]
	pub categories: Vec<Category>,
}

fn strip_suffix(text: &mut String, suffix: &str) {
	if suffix.is_empty() {
		return;
	}
	if let Some(at) = text.find(suffix) {
		text.truncate(at);
	}
}

impl GraphData {
	pub fn from_json(json: &str) -> crate::error::Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Drop the build-time disambiguation suffix from names and link endpoints and
	/// enlarge every node by `boost`.
	pub fn normalize(&mut self, suffix: &str, boost: f64) {
		for node in &mut self.nodes {
			node.symbol_size += boost;
			strip_suffix(&mut node.name, suffix);
		}
		for link in &mut self.links {
			strip_suffix(&mut link.source, suffix);
			strip_suffix(&mut link.target, suffix);
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	const DOC: &str = r#"{
		"nodes": [
			{"id": "0", "name": "Wiki", "symbolSize": 20, "value": "", "category": 0},
			{"id": "1", "name": "Setup • guide", "symbolSize": 8, "value": "/Wiki/guide/setup", "category": 1}
		],
		"links": [{"source": "0", "target": "1 • x"}],
		"categories": [{"name": "Wiki"}, {"name": "guide"}]
	}"#;

	#[test]
	fn parses_generated_document() {
		let graph = GraphData::from_json(DOC).unwrap();
		assert_eq!(graph.nodes.len(), 2);
		assert_eq!(graph.nodes[1].value, "/Wiki/guide/setup");
		assert_eq!(graph.nodes[1].category, Some(1));
		assert_eq!(graph.categories[1].name, "guide");
	}

	#[test]
	fn optional_fields_default() {
		let graph =
			GraphData::from_json(r#"{"nodes": [{"id": "a", "name": "A"}], "links": []}"#).unwrap();
		assert_eq!(graph.nodes[0].symbol_size, 0.0);
		assert_eq!(graph.nodes[0].category, None);
		assert!(graph.categories.is_empty());
	}

	#[test]
	fn normalize_strips_suffix_and_boosts() {
		let mut graph = GraphData::from_json(DOC).unwrap();
		graph.normalize(" •", 5.0);
		assert_eq!(graph.nodes[1].name, "Setup");
		assert_eq!(graph.nodes[1].symbol_size, 13.0);
		assert_eq!(graph.nodes[0].symbol_size, 25.0);
		assert_eq!(
			graph.links[0],
			GraphLink {
				source: "0".into(),
				target: "1".into()
			}
		);
	}

	#[test]
	fn rejects_missing_links() {
		assert!(GraphData::from_json(r#"{"nodes": []}"#).is_err());
	}
}
