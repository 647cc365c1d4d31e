/// Global keyboard shortcuts of the search box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
	FocusSearch,
	Dismiss,
	Previous,
	Next,
}

impl KeyAction {
	pub fn from_key(key: &str, ctrl: bool) -> Option<Self> {
		match key {
			"/" if ctrl => Some(Self::FocusSearch),
			"Escape" => Some(Self::Dismiss),
			"ArrowUp" => Some(Self::Previous),
			"ArrowDown" => Some(Self::Next),
			_ => None,
		}
	}
}

/// Index of the suggestion to focus after a move, clamped to `0..len`.
///
/// `current` is the focused suggestion, `None` when focus is elsewhere (e.g. the input).
pub fn move_focus(current: Option<usize>, len: usize, action: KeyAction) -> Option<usize> {
	if len == 0 {
		return None;
	}
	match (action, current) {
		(KeyAction::Previous, Some(i)) => Some(i.saturating_sub(1)),
		(KeyAction::Previous, None) => Some(0),
		(KeyAction::Next, Some(i)) => Some((i + 1).min(len - 1)),
		(KeyAction::Next, None) => Some(0),
		_ => None,
	}
}
