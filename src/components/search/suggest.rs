use std::collections::HashSet;

use super::index::FieldHits;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
	pub href: String,
	pub title: String,
	pub description: String,
}

/// What the suggestion panel shows for one query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SuggestionPanel {
	#[default]
	Empty,
	NoResults(String),
	Results(Vec<Suggestion>),
}

/// Flatten per-field hits into at most `limit` suggestions, one per `href`,
/// keeping the first occurrence.
pub fn collect_suggestions(hits: Vec<FieldHits>, limit: usize) -> Vec<Suggestion> {
	let mut seen = HashSet::new();
	hits.into_iter()
		.flat_map(|h| h.docs)
		.filter(|doc| seen.insert(doc.href.clone()))
		.take(limit)
		.map(|doc| Suggestion {
			href: doc.href,
			title: doc.title,
			description: doc.description,
		})
		.collect()
}

/// What the panel shows for `query`.
pub fn panel_for(query: &str, suggestions: Vec<Suggestion>) -> SuggestionPanel {
	if !suggestions.is_empty() {
		SuggestionPanel::Results(suggestions)
	} else if query.is_empty() {
		SuggestionPanel::Empty
	} else {
		SuggestionPanel::NoResults(query.to_owned())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::search::index::{Field, SearchDocument};

	fn doc(id: u64, href: &str, title: &str, description: &str) -> SearchDocument {
		SearchDocument {
			id,
			href: href.into(),
			title: title.into(),
			description: description.into(),
		}
	}

	#[test]
	fn duplicates_across_fields_collapse_to_first() {
		let a = doc(0, "/a/", "Graph", "graph basics");
		let b = doc(1, "/b/", "Other", "graph advanced");
		let hits = vec![
			FieldHits {
				field: Field::Title,
				docs: vec![a.clone()],
			},
			FieldHits {
				field: Field::Description,
				docs: vec![a, b],
			},
		];
		let hrefs: Vec<_> = collect_suggestions(hits, 5)
			.into_iter()
			.map(|s| s.href)
			.collect();
		assert_eq!(hrefs, vec!["/a/", "/b/"]);
	}

	#[test]
	fn never_more_than_limit() {
		let docs = (0..12)
			.map(|i| doc(i, &format!("/p{i}/"), &format!("Page {i}"), "page text"))
			.collect::<Vec<_>>();
		let hits = vec![
			FieldHits {
				field: Field::Title,
				docs: docs[..8].to_vec(),
			},
			FieldHits {
				field: Field::Description,
				docs: docs[4..].to_vec(),
			},
		];
		let suggestions = collect_suggestions(hits, 5);
		assert_eq!(suggestions.len(), 5);
		let distinct: HashSet<_> = suggestions.iter().map(|s| &s.href).collect();
		assert_eq!(distinct.len(), 5);
	}

	#[test]
	fn section_entries_with_distinct_hrefs_survive() {
		let hits = vec![FieldHits {
			field: Field::Title,
			docs: vec![
				doc(0, "/guide/", "Guide", "Overview"),
				doc(1, "/guide/#setup", "Guide", "Setup"),
			],
		}];
		let suggestions = collect_suggestions(hits, 5);
		assert_eq!(suggestions.len(), 2);
		assert_eq!(suggestions[1].description, "Setup");
	}

	#[test]
	fn no_results_names_the_query() {
		let panel = panel_for("xyz123", collect_suggestions(Vec::new(), 5));
		assert_eq!(panel, SuggestionPanel::NoResults("xyz123".into()));
	}

	#[test]
	fn empty_query_shows_nothing() {
		assert_eq!(panel_for("", Vec::new()), SuggestionPanel::Empty);
	}
}
