/// Vertical placement of a table-of-contents target section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Section {
	pub top: f64,
	pub height: f64,
}

/// Index of the table-of-contents entry to mark active at `scroll`.
///
/// A section spans from its top to the next section's top (the last one uses its own
/// height), with both edges moved up by `tolerance`. A later match replaces an earlier one.
pub fn active_section(sections: &[Section], scroll: f64, tolerance: f64) -> Option<usize> {
	let mut active = None;
	for (i, section) in sections.iter().enumerate() {
		let bottom = sections
			.get(i + 1)
			.map(|next| next.top)
			.unwrap_or(section.top + section.height);
		if scroll >= section.top - tolerance && scroll < bottom - tolerance {
			active = Some(i);
		}
	}
	active
}

#[cfg(test)]
mod tests {
	use super::*;

	fn toc() -> Vec<Section> {
		[0.0, 100.0, 200.0]
			.into_iter()
			.map(|top| Section { top, height: 100.0 })
			.collect()
	}

	#[test]
	fn middle_section_is_active() {
		assert_eq!(active_section(&toc(), 150.0, 20.0), Some(1));
	}

	#[test]
	fn tolerance_looks_ahead() {
		assert_eq!(active_section(&toc(), 79.0, 20.0), Some(0));
		assert_eq!(active_section(&toc(), 80.0, 20.0), Some(1));
		assert_eq!(active_section(&toc(), 0.0, 20.0), Some(0));
	}

	#[test]
	fn past_the_last_section_nothing_is_active() {
		assert_eq!(active_section(&toc(), 280.0, 20.0), None);
		assert_eq!(active_section(&[], 10.0, 20.0), None);
	}
}
