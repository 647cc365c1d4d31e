use log::debug;
use wasm_bindgen::prelude::*;

use super::language::{REGISTERED, canonical};

/// Output of a highlighting pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Highlighted {
	/// Language the highlighter settled on, as it names it.
	pub language: Option<String>,
	/// HTML markup replacing the block's text.
	pub markup: String,
}

/// Anything able to turn source text into highlighted markup.
pub trait SyntaxHighlighter {
	/// Highlight `code` as `language`, or auto-detect among the registered grammars when
	/// `language` is `None`. Returns `None` when nothing could be produced.
	fn highlight(&self, code: &str, language: Option<&str>) -> Option<Highlighted>;
}

#[wasm_bindgen]
extern "C" {
	type HljsResult;

	#[wasm_bindgen(method, getter)]
	fn value(this: &HljsResult) -> String;

	#[wasm_bindgen(method, getter)]
	fn language(this: &HljsResult) -> Option<String>;

	#[wasm_bindgen(js_namespace = hljs, js_name = highlight, catch)]
	fn hljs_highlight(code: &str, options: &JsValue) -> Result<HljsResult, JsValue>;

	#[wasm_bindgen(js_namespace = hljs, js_name = highlightAuto, catch)]
	fn hljs_highlight_auto(code: &str, subset: &js_sys::Array) -> Result<HljsResult, JsValue>;
}

/// The page's `hljs` global.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hljs;

impl SyntaxHighlighter for Hljs {
	fn highlight(&self, code: &str, language: Option<&str>) -> Option<Highlighted> {
		let result = match language {
			Some(lang) => {
				let options = js_sys::Object::new();
				js_sys::Reflect::set(&options, &"language".into(), &lang.into()).ok()?;
				js_sys::Reflect::set(&options, &"ignoreIllegals".into(), &true.into()).ok()?;
				hljs_highlight(code, &options)
			}
			None => {
				let subset: js_sys::Array = REGISTERED.iter().map(|l| JsValue::from_str(l)).collect();
				hljs_highlight_auto(code, &subset)
			}
		};
		match result {
			Ok(r) => Some(Highlighted {
				language: r.language(),
				markup: r.value(),
			}),
			Err(e) => {
				debug!("hljs failed: {e:?}");
				None
			}
		}
	}
}

/// What a code block ends up showing.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
	pub label: String,
	/// Replacement markup, `None` to leave the block's content untouched.
	pub markup: Option<String>,
	pub lines: usize,
}

/// Decide label and markup for one code block.
pub fn annotate<H: SyntaxHighlighter + ?Sized>(
	code: &str,
	hint: Option<&str>,
	highlighter: &H,
	placeholder: &str,
) -> Annotation {
	let lines = line_count(code);
	let unknown = || Annotation {
		label: placeholder.to_owned(),
		markup: None,
		lines,
	};

	match hint {
		Some(hint) => match canonical(hint) {
			Some(lang) => Annotation {
				label: lang.to_owned(),
				markup: highlighter.highlight(code, Some(lang)).map(|h| h.markup),
				lines,
			},
			None => unknown(),
		},
		None => match highlighter.highlight(code, None) {
			Some(h) => Annotation {
				label: h
					.language
					.as_deref()
					.and_then(canonical)
					.unwrap_or(placeholder)
					.to_owned(),
				markup: Some(h.markup),
				lines,
			},
			None => unknown(),
		},
	}
}

/// Number of rendered lines; a trailing newline does not start a new one.
pub fn line_count(code: &str) -> usize {
	let trimmed = code.strip_suffix('\n').unwrap_or(code);
	if trimmed.is_empty() {
		1
	} else {
		trimmed.split('\n').count()
	}
}

/// Text of the line-number gutter.
pub fn gutter_text(lines: usize) -> String {
	(1..=lines)
		.map(|n| n.to_string())
		.collect::<Vec<_>>()
		.join("\n")
}
