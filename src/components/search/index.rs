//! Search corpus model and the page's full-text index.
//!
//! Indexing is done by the FlexSearch `Document` index the page loads; this module only
//! feeds it and decodes its enriched results.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use wasm_bindgen::prelude::*;

use crate::error::{Error, Result};

/// Null and missing descriptions both read as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<String, D::Error> {
	Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

/// One searchable entry supplied by the page.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SearchDocument {
	/// Unique id within the corpus.
	pub id: u64,
	/// Link target, possibly with a section anchor.
	pub href: String,
	/// Page title.
	pub title: String,
	/// Page or section summary.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub description: String,
}

/// Indexed document fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
	/// The `title` field.
	Title,
	/// The `description` field.
	Description,
}

impl Field {
	fn from_name(name: &str) -> Option<Self> {
		match name {
			"title" => Some(Self::Title),
			"description" => Some(Self::Description),
			_ => None,
		}
	}
}

/// Hits for one field, best first.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldHits {
	/// Field the documents matched in.
	pub field: Field,
	/// Matching documents.
	pub docs: Vec<SearchDocument>,
}

/// A full-text index over [`SearchDocument`]s.
pub trait TextIndex {
	/// Add one document; ids already present are the index's business.
	fn add(&mut self, doc: SearchDocument);

	/// Results grouped per indexed field, each group holding at most `limit` documents.
	fn search(&self, query: &str, limit: usize) -> Vec<FieldHits>;
}

const INDEX_OPTIONS: &str = r#"{
	"tokenize": "forward",
	"cache": 100,
	"document": {
		"id": "id",
		"store": ["href", "title", "description"],
		"index": ["title", "description"]
	}
}"#;

#[wasm_bindgen]
extern "C" {
	type FlexDocument;

	#[wasm_bindgen(method, catch)]
	fn add(this: &FlexDocument, doc: &JsValue) -> std::result::Result<(), JsValue>;

	#[wasm_bindgen(method, catch)]
	fn search(
		this: &FlexDocument,
		query: &str,
		options: &JsValue,
	) -> std::result::Result<JsValue, JsValue>;
}

#[derive(Deserialize)]
struct StoredDoc {
	#[serde(default)]
	href: String,
	#[serde(default)]
	title: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	description: String,
}

#[derive(Deserialize)]
struct EnrichedHit {
	id: u64,
	doc: StoredDoc,
}

#[derive(Deserialize)]
struct EnrichedField {
	field: String,
	#[serde(default)]
	result: Vec<EnrichedHit>,
}

/// Decode an enriched FlexSearch result (`[{field, result: [{id, doc}]}]`).
///
/// Unknown fields and fields without hits are dropped.
pub fn decode_hits(json: &str) -> Result<Vec<FieldHits>> {
	let fields: Vec<EnrichedField> = serde_json::from_str(json)?;
	Ok(fields
		.into_iter()
		.filter_map(|f| {
			let field = Field::from_name(&f.field)?;
			let docs: Vec<SearchDocument> = f
				.result
				.into_iter()
				.map(|hit| SearchDocument {
					id: hit.id,
					href: hit.doc.href,
					title: hit.doc.title,
					description: hit.doc.description,
				})
				.collect();
			(!docs.is_empty()).then_some(FieldHits { field, docs })
		})
		.collect())
}

/// The page's `FlexSearch.Document` index, configured with forward tokenization over
/// `title` and `description`.
pub struct FlexSearchIndex {
	inner: FlexDocument,
}

impl FlexSearchIndex {
	/// Build an empty index. Fails when the page did not load FlexSearch.
	pub fn new() -> Result<Self> {
		let namespace = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("FlexSearch"))?;
		if namespace.is_undefined() {
			return Err(Error::MissingElement("FlexSearch".into()));
		}
		let ctor: js_sys::Function = js_sys::Reflect::get(&namespace, &JsValue::from_str("Document"))?
			.dyn_into()
			.map_err(Error::from)?;
		let options = js_sys::JSON::parse(INDEX_OPTIONS)?;
		let inner = js_sys::Reflect::construct(&ctor, &js_sys::Array::of1(&options))?;
		Ok(Self {
			inner: inner.unchecked_into(),
		})
	}

	fn query(&self, query: &str, limit: usize) -> Result<Vec<FieldHits>> {
		let options = js_sys::JSON::parse(&format!(r#"{{"limit": {limit}, "enrich": true}}"#))?;
		let raw = self.inner.search(query, &options)?;
		let json: String = js_sys::JSON::stringify(&raw)?.into();
		decode_hits(&json)
	}
}

impl TextIndex for FlexSearchIndex {
	fn add(&mut self, doc: SearchDocument) {
		let added = serde_json::to_string(&doc)
			.map_err(Error::from)
			.and_then(|json| Ok(js_sys::JSON::parse(&json)?))
			.and_then(|value| Ok(self.inner.add(&value)?));
		if let Err(e) = added {
			warn!("could not index {}: {e}", doc.href);
		}
	}

	fn search(&self, query: &str, limit: usize) -> Vec<FieldHits> {
		if query.trim().is_empty() || limit == 0 {
			return Vec::new();
		}
		self.query(query, limit).unwrap_or_else(|e| {
			warn!("search for {query:?} failed: {e}");
			Vec::new()
		})
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn null_and_missing_descriptions_read_as_empty() {
		let corpus: Vec<SearchDocument> = serde_json::from_str(
			r#"[
				{"id": 0, "href": "/a/", "title": "A", "description": "ok"},
				{"id": 1, "href": "/b/", "title": "B", "description": null},
				{"id": 2, "href": "/c/", "title": "C"}
			]"#,
		)
		.unwrap();
		assert_eq!(corpus.len(), 3);
		assert_eq!(corpus[0].description, "ok");
		assert_eq!(corpus[1].description, "");
		assert_eq!(corpus[2].description, "");
	}

	#[test]
	fn decodes_enriched_results_per_field() {
		let hits = decode_hits(
			r#"[
				{"field": "title", "result": [
					{"id": 0, "doc": {"href": "/install/", "title": "Installation", "description": "Setup"}}
				]},
				{"field": "description", "result": [
					{"id": 3, "doc": {"href": "/config/#flags", "title": "Configuration", "description": null}},
					{"id": 0, "doc": {"href": "/install/", "title": "Installation", "description": "Setup"}}
				]}
			]"#,
		)
		.unwrap();
		assert_eq!(hits.len(), 2);
		assert_eq!(hits[0].field, Field::Title);
		assert_eq!(hits[0].docs[0].href, "/install/");
		assert_eq!(hits[1].field, Field::Description);
		assert_eq!(hits[1].docs[0].id, 3);
		assert_eq!(hits[1].docs[0].description, "");
	}

	#[test]
	fn empty_and_unknown_fields_are_dropped() {
		let hits = decode_hits(
			r#"[
				{"field": "title", "result": []},
				{"field": "content", "result": [{"id": 1, "doc": {"href": "/x/"}}]}
			]"#,
		)
		.unwrap();
		assert!(hits.is_empty());
		assert!(decode_hits("[]").unwrap().is_empty());
		assert!(decode_hits("{}").is_err());
	}
}
