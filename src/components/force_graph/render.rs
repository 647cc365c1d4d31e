use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

const LABEL_GAP: f64 = 3.0;
const TOOLTIP_PAD: f64 = 6.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&state.options.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	if state.options.tooltip {
		draw_tooltip(state, ctx);
	}
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let line_width = 1.0 / k;
	let emphasis = state.options.emphasis_width;
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());

		// t=0: every edge at base alpha; t=1: adjacent edges widen, the rest dim
		let (alpha, width) = if is_highlighted {
			(0.6 + 0.3 * t, line_width * (1.0 + (emphasis - 1.0) * t))
		} else {
			(0.6 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};

		let (ux, uy) = (dx / dist, dy / dist);
		let (r1, r2) = (n1.data.user_data.radius, n2.data.user_data.radius);
		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(n1.data.user_data.color);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * r2, y2 - uy * r2);
		ctx.stroke();
	});
	ctx.set_global_alpha(1.0);
}

fn draw_label(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, text: &str, x: f64, y: f64) {
	if !state.options.show_labels || text.is_empty() {
		return;
	}
	ctx.set_font(&format!("{}px sans-serif", 10.0 / state.transform.k.max(0.5)));
	let _ = ctx.fill_text(text, x, y);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = (1.0 - 0.7 * t, info.radius * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(info.color);
		ctx.fill();

		ctx.set_global_alpha(alpha * 0.8);
		ctx.set_fill_style_str(label_color(&state.options.background));
		draw_label(state, ctx, &info.label, x + radius + LABEL_GAP, y + 3.0);
		ctx.set_global_alpha(1.0);
	});

	if !has_highlight {
		return;
	}

	// Emphasised nodes go on top.
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let radius = if state.is_hovered(idx) {
			info.radius * (1.0 + 0.35 * t)
		} else {
			info.radius * (1.0 + 0.2 * t)
		};

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(info.color);
		ctx.fill();

		if state.is_hovered(idx) && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / state.transform.k, 0.0, 2.0 * PI);
			ctx.set_global_alpha(0.7 * t);
			ctx.set_stroke_style_str(info.color);
			ctx.set_line_width(1.5 / state.transform.k);
			ctx.stroke();
			ctx.set_global_alpha(1.0);
		}

		ctx.set_fill_style_str(label_color(&state.options.background));
		ctx.set_font(&format!(
			"bold {}px sans-serif",
			10.0 / state.transform.k.max(0.5)
		));
		if state.options.show_labels && !info.label.is_empty() {
			let _ = ctx.fill_text(&info.label, x + radius + LABEL_GAP, y + 3.0);
		}
	});
}

fn draw_tooltip(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let Some(idx) = state.hover.node else {
		return;
	};
	let Some(info) = state.node_info(idx) else {
		return;
	};
	let mut pos = None;
	state.graph.visit_nodes(|node| {
		if node.index() == idx {
			pos = Some((node.x() as f64, node.y() as f64));
		}
	});
	let Some((gx, gy)) = pos else {
		return;
	};
	let (sx, sy) = (
		gx * state.transform.k + state.transform.x,
		gy * state.transform.k + state.transform.y,
	);

	let text = if info.url.is_empty() {
		info.label
	} else {
		format!("{} ({})", info.label, info.url)
	};
	ctx.set_font("12px sans-serif");
	let width = ctx.measure_text(&text).map(|m| m.width()).unwrap_or(0.0);
	let (w, h) = (width + 2.0 * TOOLTIP_PAD, 12.0 + 2.0 * TOOLTIP_PAD);
	let bx = (sx + 12.0).min(state.width - w).max(0.0);
	let by = (sy - h - 8.0).max(0.0);

	ctx.set_global_alpha(0.9);
	ctx.set_fill_style_str("#333");
	ctx.fill_rect(bx, by, w, h);
	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str("#fff");
	let _ = ctx.fill_text(&text, bx + TOOLTIP_PAD, by + TOOLTIP_PAD + 10.0);
}

/// Readable label colour for a CSS background colour.
pub fn label_color(background: &str) -> &'static str {
	match rgb_of(background) {
		Some((r, g, b)) if 0.299 * r + 0.587 * g + 0.114 * b > 140.0 => "#222",
		_ => "#eee",
	}
}

fn rgb_of(color: &str) -> Option<(f64, f64, f64)> {
	let color = color.trim();
	if let Some(hex) = color.strip_prefix('#') {
		if !hex.is_ascii() {
			return None;
		}
		let hex = match hex.len() {
			3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
			6 | 8 => hex[..6].to_owned(),
			_ => return None,
		};
		let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok().map(f64::from);
		return Some((channel(0)?, channel(2)?, channel(4)?));
	}
	let inner = color
		.strip_prefix("rgba(")
		.or_else(|| color.strip_prefix("rgb("))?
		.strip_suffix(')')?;
	let mut parts = inner.split(',').map(|p| p.trim().parse::<f64>().ok());
	Some((parts.next()??, parts.next()??, parts.next()??))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn labels_contrast_with_background() {
		assert_eq!(label_color("rgb(255, 255, 255)"), "#222");
		assert_eq!(label_color("rgba(0, 0, 0, 0)"), "#eee");
		assert_eq!(label_color("#1a1a2e"), "#eee");
		assert_eq!(label_color("#fff"), "#222");
		assert_eq!(label_color("transparent"), "#eee");
	}

	#[test]
	fn parses_css_colors() {
		assert_eq!(rgb_of("#102030"), Some((16.0, 32.0, 48.0)));
		assert_eq!(rgb_of("rgb(1, 2, 3)"), Some((1.0, 2.0, 3.0)));
		assert_eq!(rgb_of("#12"), None);
	}
}
