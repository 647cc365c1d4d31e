/// Node colours, indexed by category.
pub const PALETTE: &[&str] = &[
	"#3EECAC", "#EEA236", "#5470C6", "#9A60B4", "#FC8452", "#73C0DE", "#DA70D6",
];

/// Canvas background until the page's own colour is known.
pub const DEFAULT_BACKGROUND: &str = "#1a1a2e";

/// Rendering settings shared by every chart of a session.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
	/// CSS colour filling the canvas.
	pub background: String,
	/// Node colours by category.
	pub palette: &'static [&'static str],
	/// Initial scale.
	pub zoom: f64,
	/// Smallest scale reachable by zooming.
	pub min_scale: f64,
	/// Largest scale reachable by zooming.
	pub max_scale: f64,
	/// Draw node names.
	pub show_labels: bool,
	/// Show name and URL of the hovered node.
	pub tooltip: bool,
	/// Width multiplier for edges adjacent to the hovered node.
	pub emphasis_width: f64,
}

impl Default for ChartOptions {
	fn default() -> Self {
		Self {
			background: DEFAULT_BACKGROUND.into(),
			palette: PALETTE,
			zoom: 2.0,
			min_scale: 0.5,
			max_scale: 5.0,
			show_labels: true,
			tooltip: false,
			emphasis_width: 2.5,
		}
	}
}

impl ChartOptions {
	/// Palette colour of a category; uncategorised nodes take the first.
	pub fn color(&self, category: Option<usize>) -> &'static str {
		self.palette[category.unwrap_or(0) % self.palette.len()]
	}

	/// Settings for the full-screen view.
	pub fn modal(&self) -> Self {
		Self {
			show_labels: true,
			tooltip: true,
			zoom: 1.0,
			..self.clone()
		}
	}

	/// Settings for the sidebar panel.
	pub fn sidebar(&self) -> Self {
		Self {
			tooltip: false,
			..self.clone()
		}
	}

	/// `k` limited to the scale range.
	pub fn clamp_scale(&self, k: f64) -> f64 {
		k.clamp(self.min_scale, self.max_scale)
	}
}
