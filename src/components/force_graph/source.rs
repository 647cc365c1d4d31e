use log::{debug, warn};
use url::Url;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::types::GraphData;
use crate::error::{Error, Result};
use crate::page;

const FALLBACK_PATH: &str = "assets/js/graph.json";

fn tidy(path: String) -> String {
	let path = path.strip_prefix("./").map(str::to_owned).unwrap_or(path);
	if path.starts_with("//") {
		path[1..].to_owned()
	} else {
		path
	}
}

fn resolve(script_src: &str, page_href: &str, relative: &str) -> Result<String> {
	let page = Url::parse(page_href)?;
	let script = page.join(script_src)?;
	Ok(script.join(relative)?.path().to_owned())
}

/// Where the graph document lives: `relative` resolved against the viewer's script URL.
///
/// An absolute `relative` is used as is. Without a script URL, or when it cannot be
/// resolved, `{base_url}assets/js/graph.json` is used instead.
pub fn graph_data_url(
	script_src: Option<&str>,
	page_href: &str,
	base_url: &str,
	relative: &str,
) -> String {
	if Url::parse(relative).is_ok() {
		return relative.to_owned();
	}
	let resolved = match script_src {
		Some(src) => resolve(src, page_href, relative).map_err(|e| {
			warn!("cannot derive graph url from script {src:?}: {e}");
		}),
		None => Err(()),
	};
	let url = resolved.unwrap_or_else(|()| {
		let base = if base_url.is_empty() || base_url.ends_with('/') {
			base_url.to_owned()
		} else {
			format!("{base_url}/")
		};
		format!("{base}{FALLBACK_PATH}")
	});
	tidy(url)
}

/// URL of the first script or preloaded module whose URL contains `marker`.
///
/// Bundlers often load the module from an inline `<script type="module">` and only name
/// the file in a `modulepreload` link.
pub fn script_src(document: &web_sys::Document, marker: &str) -> Option<String> {
	let candidates = document
		.query_selector_all(r#"script[src], link[rel="modulepreload"][href]"#)
		.ok()?;
	(0..candidates.length())
		.filter_map(|i| candidates.item(i))
		.filter_map(|n| n.dyn_into::<web_sys::Element>().ok())
		.filter_map(|el| el.get_attribute("src").or_else(|| el.get_attribute("href")))
		.find(|url| url.contains(marker))
}

/// Fetch and decode the graph document.
pub async fn fetch_graph(url: &str) -> Result<GraphData> {
	debug!("fetching graph data from {url}");
	let window = page::window()?;
	let response: Response = JsFuture::from(window.fetch_with_str(url))
		.await?
		.dyn_into()
		.map_err(Error::from)?;
	if !response.ok() {
		return Err(Error::Status {
			url: url.to_owned(),
			status: response.status(),
		});
	}
	let text = JsFuture::from(response.text()?).await?;
	GraphData::from_json(&text.as_string().unwrap_or_default())
}

#[cfg(test)]
mod tests {
	use super::*;

	const PAGE: &str = "https://example.org/Wiki/guide/setup/";

	#[test]
	fn resolves_next_to_script() {
		let url = graph_data_url(
			Some("../../assets/js/docsite_enhance.js"),
			PAGE,
			"",
			"../js/graph.json",
		);
		assert_eq!(url, "/Wiki/assets/js/graph.json");
	}

	#[test]
	fn absolute_script_url() {
		let url = graph_data_url(
			Some("https://cdn.example.org/site/js/app.js"),
			PAGE,
			"",
			"../js/graph.json",
		);
		assert_eq!(url, "/site/js/graph.json");
	}

	#[test]
	fn falls_back_to_base_url() {
		assert_eq!(
			graph_data_url(None, PAGE, "../..", "../js/graph.json"),
			"../../assets/js/graph.json"
		);
		assert_eq!(
			graph_data_url(Some("app.js"), "not a url", "./", "../js/graph.json"),
			"assets/js/graph.json"
		);
	}

	#[test]
	fn absolute_data_path_is_kept() {
		let data = "data:application/json,%7B%7D";
		assert_eq!(graph_data_url(None, PAGE, "", data), data);
		assert_eq!(
			graph_data_url(Some("app.js"), PAGE, "", "https://cdn.example.org/graph.json"),
			"https://cdn.example.org/graph.json"
		);
	}

	#[test]
	fn collapses_double_slash() {
		assert_eq!(tidy("//assets/js/graph.json".into()), "/assets/js/graph.json");
		assert_eq!(tidy("./x".into()), "x");
	}
}
