//! Selection state for the spinner.

/// Tracks the committed item and the initial-delivery latch.
///
/// The state starts in the initial phase: the very first selection event a
/// spinner processes is the synthetic one its platform delivers on attach,
/// and the widget treats it as initialization rather than a user choice.
/// [`mark_initialized`](Self::mark_initialized) flips the latch exactly once;
/// it never resets.
#[derive(Debug, Clone)]
pub struct SelectionState<T> {
    selected: Option<T>,
    is_selected: bool,
    initial_phase: bool,
}

impl<T> SelectionState<T> {
    /// Create the pre-initialization state.
    ///
    /// `is_selected` starts true so that, absent any intervention, the first
    /// delivered position is adopted as the committed item.
    pub fn new() -> Self {
        Self {
            selected: None,
            is_selected: true,
            initial_phase: true,
        }
    }

    /// Whether a committed item is present.
    pub fn has_selection(&self) -> bool {
        self.is_selected && self.selected.is_some()
    }

    /// The committed item, if any.
    pub fn selected_item(&self) -> Option<&T> {
        if self.is_selected {
            self.selected.as_ref()
        } else {
            None
        }
    }

    /// Commit an item.
    pub fn adopt(&mut self, item: T) {
        self.selected = Some(item);
        self.is_selected = true;
    }

    /// Drop the committed item.
    pub fn clear(&mut self) {
        self.selected = None;
        self.is_selected = false;
    }

    /// Whether the first selection event has not yet been processed.
    pub fn is_initial_phase(&self) -> bool {
        self.initial_phase
    }

    /// Leave the initial phase. One-way; later calls are no-ops.
    pub fn mark_initialized(&mut self) {
        self.initial_phase = false;
    }
}

impl<T> Default for SelectionState<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_initial_phase_without_item() {
        let state = SelectionState::<String>::new();
        assert!(state.is_initial_phase());
        assert!(!state.has_selection());
        assert_eq!(state.selected_item(), None);
    }

    #[test]
    fn test_adopt_and_clear() {
        let mut state = SelectionState::new();
        state.adopt("a".to_string());
        assert!(state.has_selection());
        assert_eq!(state.selected_item(), Some(&"a".to_string()));

        state.clear();
        assert!(!state.has_selection());
        assert_eq!(state.selected_item(), None);
    }

    #[test]
    fn test_latch_is_one_way() {
        let mut state = SelectionState::<String>::new();
        state.mark_initialized();
        assert!(!state.is_initial_phase());

        state.clear();
        state.adopt("a".to_string());
        state.mark_initialized();
        assert!(!state.is_initial_phase());
    }

    #[test]
    fn test_cleared_state_hides_stale_item() {
        let mut state = SelectionState::new();
        state.adopt("a".to_string());
        state.clear();
        state.adopt("b".to_string());
        assert_eq!(state.selected_item(), Some(&"b".to_string()));
    }
}
