//! Spinner widget for single-choice selection.
//!
//! The Spinner widget provides a collapsed single-choice control with:
//! - Placeholder display until a selection is committed
//! - Row recycling for collapsed and dropdown rendering via a delegate
//! - Re-selection events when the same position is chosen again
//! - Open/close tracking for the dropdown list
//!
//! # Example
//!
//! ```
//! use spindle::widget::Spinner;
//! use spindle_core::init_global_registry;
//!
//! init_global_registry();
//!
//! let mut spinner = Spinner::with_text_delegate().with_default_selection(false);
//! spinner.set_placeholder("Pick a fruit".to_string());
//!
//! spinner.item_selected.connect(|(position, item)| {
//!     println!("Selected {:?} at {}", item, position);
//! });
//!
//! spinner.set_data(vec!["Apple".to_string(), "Banana".to_string()]);
//! spinner.set_selected_item(&"Banana".to_string());
//! assert_eq!(spinner.selected_item(), Some("Banana".to_string()));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use spindle_core::{Object, ObjectBase, ObjectId, Signal};

use crate::adapter::SpinnerAdapter;
use crate::choice::{BasicChoiceControl, ChoiceControl, ReselectControl};
use crate::role::RoleDelegate;
use crate::selection::SelectionState;
use crate::text::{SpinnerText, TextDelegate};
use crate::view::{ViewArena, ViewId};

/// A single-choice spinner widget.
///
/// The spinner owns its [`SpinnerAdapter`], a [`ViewArena`] for retained
/// rows, and a [`ReselectControl`] wrapping the platform choice control.
///
/// # Selection Lifecycle
///
/// The first selection event the spinner processes is the synthetic one the
/// platform delivers on attach. During that initial event the spinner either
/// adopts the delivered item (default) or shows the placeholder instead, per
/// [`with_default_selection`](Self::with_default_selection). The
/// [`item_selected`](Self::item_selected) signal fires for every processed
/// event, the initial one included.
pub struct Spinner<T: Clone + PartialEq + Send + Sync + 'static> {
    base: ObjectBase,
    adapter: SpinnerAdapter<T>,
    arena: ViewArena,
    selection: SelectionState<T>,
    control: ReselectControl,
    /// Whether the initial event adopts the delivered item.
    select_by_default: bool,
    summary_slot: Option<ViewId>,
    dropdown_slots: Vec<ViewId>,
    dirty: Arc<AtomicBool>,

    /// Emitted for every processed selection event with the reported
    /// position and the committed item (`None` when the placeholder shows).
    pub item_selected: Signal<(usize, Option<T>)>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Spinner<T> {
    /// Create a spinner rendering through `delegate`.
    ///
    /// # Panics
    ///
    /// Panics if the global object registry is not initialized.
    pub fn new(delegate: Box<dyn RoleDelegate<T>>) -> Self {
        let adapter = SpinnerAdapter::new(delegate);
        let dirty = Arc::new(AtomicBool::new(true));

        let dirty_data = dirty.clone();
        adapter.signals().data_changed.connect(move |_| {
            dirty_data.store(true, Ordering::SeqCst);
        });
        let dirty_reset = dirty.clone();
        adapter.signals().model_reset.connect(move |_| {
            dirty_reset.store(true, Ordering::SeqCst);
        });

        Self {
            base: ObjectBase::new::<Self>(),
            adapter,
            arena: ViewArena::new(),
            selection: SelectionState::new(),
            control: ReselectControl::new(Box::<BasicChoiceControl>::default()),
            select_by_default: true,
            summary_slot: None,
            dropdown_slots: Vec::new(),
            dirty,
            item_selected: Signal::new(),
        }
    }

    /// Replace the underlying choice control.
    pub fn with_control(mut self, control: Box<dyn ChoiceControl>) -> Self {
        self.control = ReselectControl::new(control);
        self
    }

    /// Configure whether the initial event commits the delivered item.
    ///
    /// With `false` the spinner starts on the placeholder and waits for an
    /// explicit selection.
    pub fn with_default_selection(mut self, select_by_default: bool) -> Self {
        self.select_by_default = select_by_default;
        self
    }

    /// The widget's object base.
    pub fn base(&self) -> &ObjectBase {
        &self.base
    }

    // ========================================================================
    // Data
    // ========================================================================

    /// Replace the data set.
    ///
    /// A committed item that is no longer present is dropped and the
    /// placeholder shows again. While the spinner is still in its initial
    /// phase this also delivers the platform's synthetic first selection.
    pub fn set_data(&mut self, items: Vec<T>) {
        self.adapter.set_data(items);
        self.control.set_row_count(self.adapter.len());

        if let Some(item) = self.selection.selected_item().cloned() {
            match self.adapter.position_of(&item) {
                Some(position) => {
                    // The item survived; move the control to its new slot
                    // without raising a selection event.
                    let _ = self.control.select(position, false);
                }
                None => {
                    tracing::debug!(
                        target: "spindle::widget",
                        "committed item missing from new data, showing placeholder"
                    );
                    self.selection.clear();
                    self.adapter.set_selected(false);
                }
            }
        }

        if self.selection.is_initial_phase() {
            self.handle_native_selection(self.control.selected_position());
        }
    }

    /// Set the placeholder item.
    pub fn set_placeholder(&mut self, placeholder: T) {
        self.adapter.set_placeholder(placeholder);
    }

    /// Remove the placeholder item.
    pub fn clear_placeholder(&mut self) {
        self.adapter.clear_placeholder();
    }

    /// The backing adapter.
    pub fn adapter(&self) -> &SpinnerAdapter<T> {
        &self.adapter
    }

    /// Snapshot of the data set.
    pub fn data(&self) -> Vec<T> {
        self.adapter.data()
    }

    /// Clone of the item at `position`.
    pub fn item_at(&self, position: usize) -> Option<T> {
        self.adapter.get(position)
    }

    /// Number of rows the open list shows.
    pub fn count(&self) -> usize {
        self.adapter.count()
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// The committed item, if any.
    pub fn selected_item(&self) -> Option<T> {
        self.selection.selected_item().cloned()
    }

    /// Position to report for the committed state.
    ///
    /// Returns 0 while an item is committed (the collapsed widget shows a
    /// single row) and the control's raw position otherwise.
    pub fn selected_item_position(&self) -> usize {
        if self.selection.has_selection() {
            0
        } else {
            self.control.selected_position()
        }
    }

    /// Whether an item is committed.
    pub fn has_selection(&self) -> bool {
        self.selection.has_selection()
    }

    /// Select the item at `position`.
    ///
    /// Ends the initial phase first, so a programmatic selection is always
    /// treated as a deliberate choice. Re-selecting the current position
    /// still raises [`item_selected`](Self::item_selected).
    pub fn set_selected_position(&mut self, position: usize) {
        self.selection.mark_initialized();
        if let Some(reported) = self.control.select(position, false) {
            self.handle_native_selection(reported);
        }
    }

    /// Select an item by value.
    ///
    /// Silently ignored when the item is not in the data set.
    pub fn set_selected_item(&mut self, item: &T) {
        match self.adapter.position_of(item) {
            Some(position) => self.set_selected_position(position),
            None => {
                tracing::trace!(
                    target: "spindle::widget",
                    "item not in data set, selection unchanged"
                );
            }
        }
    }

    /// Drop the committed item and show the placeholder.
    ///
    /// Raises [`item_selected`](Self::item_selected) with position 0 and no
    /// item. The reported position is 0 afterwards even if a real item was
    /// selected before the call.
    pub fn show_placeholder(&mut self) {
        self.selection.clear();
        self.adapter.set_selected(false);
        // Park the control at the top row without reporting the move.
        let _ = self.control.select(0, false);
        self.item_selected.emit((0, None));
        self.selection.mark_initialized();
    }

    /// Process a selection event from the underlying control.
    ///
    /// This is the single entry point for both platform callbacks and
    /// programmatic selection. The initial event initializes the widget;
    /// every later event commits the reported item when it exists.
    pub fn handle_native_selection(&mut self, position: usize) {
        if self.selection.is_initial_phase() {
            self.apply_initial_selection(position);
        } else if !self.adapter.is_empty() {
            if let Some(item) = self.adapter.get(position) {
                self.selection.adopt(item);
                self.adapter.set_selected(true);
            }
        }

        let item = self.selected_item();
        self.item_selected.emit((position, item));
        self.selection.mark_initialized();
    }

    fn apply_initial_selection(&mut self, position: usize) {
        if self.adapter.is_empty() {
            return;
        }
        if self.select_by_default {
            if let Some(item) = self.adapter.get(position) {
                self.selection.adopt(item);
                self.adapter.set_selected(true);
            }
        } else {
            self.selection.clear();
            self.adapter.set_selected(false);
        }
    }

    // ========================================================================
    // Dropdown lifecycle
    // ========================================================================

    /// Open the dropdown list.
    pub fn open(&mut self) {
        self.control.open();
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Record that the dropdown list closed.
    pub fn notify_closed(&mut self) {
        if self.control.is_open() {
            self.control.notify_closed();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Forward a window focus change.
    ///
    /// Regaining focus while the list is open counts as a dismissal.
    pub fn window_focus_changed(&mut self, has_focus: bool) {
        let was_open = self.control.is_open();
        self.control.window_focus_changed(has_focus);
        if was_open && !self.control.is_open() {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Whether the dropdown list is currently open.
    pub fn is_open(&self) -> bool {
        self.control.is_open()
    }

    /// Signal raised when the dropdown list opens.
    pub fn opened(&self) -> &Signal<()> {
        &self.control.opened
    }

    /// Signal raised when the dropdown list closes.
    pub fn closed(&self) -> &Signal<()> {
        &self.control.closed
    }

    /// Whether the widget accepts input.
    pub fn is_enabled(&self) -> bool {
        self.control.is_enabled()
    }

    /// Enable or disable input.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.control.set_enabled(enabled);
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Re-render the collapsed row and, while open, the dropdown rows.
    ///
    /// Rows are recycled in place; the dropdown rows are released when the
    /// list is closed. Clears the dirty flag.
    pub fn refresh(&mut self) {
        let position = self.control.selected_position();
        self.summary_slot = Some(self.adapter.summary_view(
            &mut self.arena,
            position,
            self.summary_slot,
        ));

        if self.control.is_open() {
            let count = self.adapter.count();
            let mut old = std::mem::take(&mut self.dropdown_slots).into_iter();
            let mut slots = Vec::with_capacity(count);
            for index in 0..count {
                slots.push(self.adapter.dropdown_view(&mut self.arena, index, old.next()));
            }
            for extra in old {
                self.adapter.discard(extra);
                self.arena.release(extra);
            }
            self.dropdown_slots = slots;
        } else {
            for slot in std::mem::take(&mut self.dropdown_slots) {
                self.adapter.discard(slot);
                self.arena.release(slot);
            }
        }

        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Whether state changed since the last [`refresh`](Self::refresh).
    pub fn needs_refresh(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// The retained view arena.
    pub fn arena(&self) -> &ViewArena {
        &self.arena
    }

    /// Root view of the collapsed row, once rendered.
    pub fn summary_slot(&self) -> Option<ViewId> {
        self.summary_slot
    }

    /// Root views of the rendered dropdown rows.
    pub fn dropdown_slots(&self) -> &[ViewId] {
        &self.dropdown_slots
    }
}

impl<T: SpinnerText + Clone + PartialEq + Send + Sync + 'static> Spinner<T> {
    /// Create a spinner using the built-in [`TextDelegate`].
    pub fn with_text_delegate() -> Self {
        Self::new(Box::new(TextDelegate::new()))
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Object for Spinner<T> {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

/// A spinner over plain strings.
pub type TextSpinner = Spinner<String>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TEXT_TAG;
    use parking_lot::Mutex;
    use spindle_core::init_global_registry;

    fn setup() {
        init_global_registry();
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    type Events = Arc<Mutex<Vec<(usize, Option<String>)>>>;

    fn capture(spinner: &TextSpinner) -> Events {
        let events: Events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        spinner.item_selected.connect(move |event| {
            events_clone.lock().push(event.clone());
        });
        events
    }

    fn summary_text(spinner: &TextSpinner) -> String {
        let slot = spinner.summary_slot().expect("summary rendered");
        let text = spinner
            .arena()
            .find_tagged(slot, TEXT_TAG)
            .expect("summary has text node");
        spinner.arena().text(text).unwrap().to_string()
    }

    #[test]
    fn test_initial_selection_commits_by_default() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        let events = capture(&spinner);

        spinner.set_data(strings(&["a", "b", "c"]));

        // Exactly one event: the synthetic initial selection.
        assert_eq!(*events.lock(), vec![(0, Some("a".to_string()))]);
        assert_eq!(spinner.selected_item(), Some("a".to_string()));
        assert!(spinner.has_selection());
    }

    #[test]
    fn test_initial_selection_can_show_placeholder() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate().with_default_selection(false);
        spinner.set_placeholder("Pick one".to_string());
        let events = capture(&spinner);

        spinner.set_data(strings(&["a", "b"]));

        assert_eq!(*events.lock(), vec![(0, None)]);
        assert_eq!(spinner.selected_item(), None);

        spinner.refresh();
        assert_eq!(summary_text(&spinner), "Pick one");
    }

    #[test]
    fn test_initial_event_with_empty_data() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        let events = capture(&spinner);

        spinner.set_data(Vec::new());
        // Initial event processed but nothing to commit.
        assert_eq!(*events.lock(), vec![(0, None)]);
        assert_eq!(spinner.selected_item(), None);
    }

    #[test]
    fn test_select_by_value() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate().with_default_selection(false);
        spinner.set_placeholder("Pick one".to_string());
        let events = capture(&spinner);

        spinner.set_data(strings(&["A", "B", "C"]));
        spinner.set_selected_item(&"B".to_string());

        assert_eq!(spinner.selected_item(), Some("B".to_string()));
        assert_eq!(spinner.selected_item_position(), 0);
        assert_eq!(
            *events.lock(),
            vec![(0, None), (1, Some("B".to_string()))]
        );

        spinner.refresh();
        assert_eq!(summary_text(&spinner), "B");
    }

    #[test]
    fn test_select_by_missing_value_is_ignored() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        spinner.set_data(strings(&["a"]));
        let events = capture(&spinner);

        spinner.set_selected_item(&"zzz".to_string());

        assert!(events.lock().is_empty());
        assert_eq!(spinner.selected_item(), Some("a".to_string()));
    }

    #[test]
    fn test_reselection_raises_event_again() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        spinner.set_data(strings(&["a", "b"]));
        let events = capture(&spinner);

        spinner.set_selected_position(1);
        spinner.set_selected_position(1);

        assert_eq!(
            *events.lock(),
            vec![(1, Some("b".to_string())), (1, Some("b".to_string()))]
        );
    }

    #[test]
    fn test_show_placeholder() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        spinner.set_placeholder("Pick one".to_string());
        spinner.set_data(strings(&["a"]));
        let events = capture(&spinner);

        spinner.show_placeholder();

        assert_eq!(*events.lock(), vec![(0, None)]);
        assert_eq!(spinner.selected_item(), None);

        spinner.refresh();
        assert_eq!(summary_text(&spinner), "Pick one");
    }

    #[test]
    fn test_show_placeholder_resets_reported_position() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        spinner.set_data(strings(&["a", "b", "c"]));
        spinner.set_selected_position(2);
        assert_eq!(spinner.selected_item_position(), 0);

        spinner.show_placeholder();

        assert_eq!(spinner.selected_item_position(), 0);
        assert_eq!(spinner.selected_item(), None);
    }

    #[test]
    fn test_select_out_of_range_position_is_ignored() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        spinner.set_data(strings(&["a", "b", "c"]));
        let events = capture(&spinner);

        spinner.set_selected_position(99);

        assert!(events.lock().is_empty());
        assert_eq!(spinner.selected_item(), Some("a".to_string()));
        assert_eq!(spinner.selected_item_position(), 0);
    }

    #[test]
    fn test_stale_selection_cleared_on_new_data() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        spinner.set_placeholder("Pick one".to_string());
        spinner.set_data(strings(&["a", "b", "c"]));
        spinner.set_selected_position(2);
        assert_eq!(spinner.selected_item(), Some("c".to_string()));

        spinner.set_data(strings(&["a", "b"]));

        assert_eq!(spinner.selected_item(), None);
        spinner.refresh();
        assert_eq!(summary_text(&spinner), "Pick one");
    }

    #[test]
    fn test_surviving_selection_kept_on_new_data() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        spinner.set_data(strings(&["a", "b", "c"]));
        spinner.set_selected_position(1);

        spinner.set_data(strings(&["b", "d"]));

        assert_eq!(spinner.selected_item(), Some("b".to_string()));
        spinner.refresh();
        assert_eq!(summary_text(&spinner), "b");
    }

    #[test]
    fn test_summary_slot_is_recycled() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        spinner.set_data(strings(&["a", "b"]));

        spinner.refresh();
        let first = spinner.summary_slot().unwrap();

        spinner.set_selected_position(1);
        spinner.refresh();
        let second = spinner.summary_slot().unwrap();

        // Same role both times: the node is rebound, not replaced.
        assert_eq!(first, second);
        assert_eq!(summary_text(&spinner), "b");
    }

    #[test]
    fn test_dropdown_rows_rendered_while_open() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        spinner.set_data(strings(&["a", "b", "c"]));

        spinner.open();
        spinner.refresh();
        assert_eq!(spinner.dropdown_slots().len(), 3);

        let texts: Vec<String> = spinner
            .dropdown_slots()
            .iter()
            .map(|&slot| {
                let text = spinner.arena().find_tagged(slot, TEXT_TAG).unwrap();
                spinner.arena().text(text).unwrap().to_string()
            })
            .collect();
        assert_eq!(texts, strings(&["a", "b", "c"]));

        spinner.notify_closed();
        spinner.refresh();
        assert!(spinner.dropdown_slots().is_empty());
    }

    #[test]
    fn test_open_empty_shows_single_placeholder_row() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        spinner.set_placeholder("Pick one".to_string());
        spinner.set_data(Vec::new());

        spinner.open();
        spinner.refresh();

        assert_eq!(spinner.dropdown_slots().len(), 1);
        let slot = spinner.dropdown_slots()[0];
        let text = spinner.arena().find_tagged(slot, TEXT_TAG).unwrap();
        assert_eq!(spinner.arena().text(text).unwrap(), "Pick one");
    }

    #[test]
    fn test_focus_regain_marks_dirty_and_closes() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        spinner.set_data(strings(&["a"]));
        spinner.open();
        spinner.refresh();
        assert!(!spinner.needs_refresh());

        spinner.window_focus_changed(true);

        assert!(!spinner.is_open());
        assert!(spinner.needs_refresh());
    }

    #[test]
    fn test_dirty_tracking() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        assert!(spinner.needs_refresh());

        spinner.set_data(strings(&["a"]));
        assert!(spinner.needs_refresh());

        spinner.refresh();
        assert!(!spinner.needs_refresh());

        spinner.adapter().modify(0, |item| item.push('!'));
        assert!(spinner.needs_refresh());
    }

    #[test]
    fn test_open_close_signals() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        spinner.set_data(strings(&["a"]));

        let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let log_open = log.clone();
        spinner.opened().connect(move |_| log_open.lock().push("open"));
        let log_close = log.clone();
        spinner.closed().connect(move |_| log_close.lock().push("close"));

        spinner.open();
        spinner.notify_closed();
        spinner.notify_closed();

        assert_eq!(*log.lock(), vec!["open", "close"]);
        assert!(!spinner.is_open());
    }

    #[test]
    fn test_enabled_passthrough() {
        setup();
        let mut spinner = TextSpinner::with_text_delegate();
        assert!(spinner.is_enabled());
        spinner.set_enabled(false);
        assert!(!spinner.is_enabled());
    }

    #[test]
    fn test_registered_in_object_registry() {
        setup();
        let spinner = TextSpinner::with_text_delegate();
        let registry = spindle_core::global_registry().unwrap();
        assert!(registry.contains(spinner.object_id()));
    }
}
