//! Language names, aliases and class hints.

/// Grammars the site registers, by canonical name.
pub const REGISTERED: &[&str] = &[
	"javascript",
	"json",
	"bash",
	"html",
	"ini",
	"toml",
	"yaml",
	"md",
	"go",
	"python",
	"cpp",
	"c",
];

const ALIASES: &[(&str, &str)] = &[
	("js", "javascript"),
	("jsx", "javascript"),
	("mjs", "javascript"),
	("jsonc", "json"),
	("sh", "bash"),
	("shell", "bash"),
	("zsh", "bash"),
	("console", "bash"),
	("xml", "html"),
	("htm", "html"),
	("xhtml", "html"),
	("svg", "html"),
	("cfg", "ini"),
	("yml", "yaml"),
	("markdown", "md"),
	("golang", "go"),
	("py", "python"),
	("python3", "python"),
	("c++", "cpp"),
	("cc", "cpp"),
	("hpp", "cpp"),
	("cxx", "cpp"),
	("h", "c"),
];

/// Canonical grammar name for a language hint or a detected language, if registered.
pub fn canonical(name: &str) -> Option<&'static str> {
	let name = name.trim().to_ascii_lowercase();
	REGISTERED
		.iter()
		.copied()
		.find(|&lang| lang == name)
		.or_else(|| {
			ALIASES
				.iter()
				.find(|(alias, _)| *alias == name)
				.map(|&(_, lang)| lang)
		})
}

/// Language hint carried by a code element's class list (`language-x` or `lang-x`).
pub fn hint_from_classes(classes: &str) -> Option<&str> {
	classes.split_whitespace().find_map(|class| {
		class
			.strip_prefix("language-")
			.or_else(|| class.strip_prefix("lang-"))
			.filter(|hint| !hint.is_empty())
	})
}
