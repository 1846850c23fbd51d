//! Native choice control seam and re-selection synthesis.
//!
//! [`ChoiceControl`] abstracts the platform single-choice control the spinner
//! sits on. Native controls conventionally suppress the selection callback
//! when the requested position equals the current one; [`ReselectControl`]
//! wraps a native control and synthesizes the missing event so callers can
//! observe every deliberate selection, repeated or not. It also owns the
//! open/closed lifecycle of the dropdown list.

use spindle_core::Signal;

/// The platform single-choice control underneath a spinner.
pub trait ChoiceControl: Send + Sync {
    /// Request selection of `position`.
    ///
    /// Returns `true` when the control raised its selection callback for the
    /// request, `false` when it suppressed it (conventionally because the
    /// position did not change). Positions outside the installed row range
    /// are ignored.
    fn select(&mut self, position: usize, animate: bool) -> bool;

    /// The control's current position.
    fn selected_position(&self) -> usize;

    /// Whether the control accepts input.
    fn is_enabled(&self) -> bool;

    /// Enable or disable input.
    fn set_enabled(&mut self, enabled: bool);

    /// Show the dropdown overlay.
    fn show_overlay(&mut self);

    /// Inform the control how many rows the list has.
    fn set_row_count(&mut self, rows: usize);
}

/// An in-process choice control with conventional native behavior.
///
/// Selecting the already-current position is suppressed and out-of-range
/// requests are dropped, matching what platform controls do. Positions are
/// clamped when the row count shrinks.
pub struct BasicChoiceControl {
    position: usize,
    rows: usize,
    enabled: bool,
    overlay_shown: bool,
}

impl BasicChoiceControl {
    /// Create a control at position 0 with no rows.
    pub fn new() -> Self {
        Self {
            position: 0,
            rows: 0,
            enabled: true,
            overlay_shown: false,
        }
    }

    /// Whether the overlay was shown at least once.
    pub fn overlay_shown(&self) -> bool {
        self.overlay_shown
    }
}

impl Default for BasicChoiceControl {
    fn default() -> Self {
        Self::new()
    }
}

impl ChoiceControl for BasicChoiceControl {
    fn select(&mut self, position: usize, _animate: bool) -> bool {
        if position >= self.rows || position == self.position {
            return false;
        }
        self.position = position;
        true
    }

    fn selected_position(&self) -> usize {
        self.position
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn show_overlay(&mut self) {
        self.overlay_shown = true;
    }

    fn set_row_count(&mut self, rows: usize) {
        self.rows = rows;
        if self.position >= rows && rows > 0 {
            self.position = rows - 1;
        }
    }
}

/// Wrapper adding re-selection events and open/close tracking.
///
/// # Re-selection
///
/// [`select`](Self::select) returns `Some(position)` when the selection
/// should be reported, covering both the native callback and the synthesized
/// same-position case, and `None` when nothing should be reported.
///
/// # Open/Close Lifecycle
///
/// [`open`](Self::open) notifies `opened` before delegating to the native
/// overlay, so observers see the transition even if showing the overlay
/// fails. [`notify_closed`](Self::notify_closed) is idempotent: it only
/// fires `closed` while the list is open.
pub struct ReselectControl {
    native: Box<dyn ChoiceControl>,
    open: bool,
    /// Emitted when the dropdown list opens.
    pub opened: Signal<()>,
    /// Emitted when the dropdown list closes.
    pub closed: Signal<()>,
}

impl ReselectControl {
    /// Wrap a native control.
    pub fn new(native: Box<dyn ChoiceControl>) -> Self {
        Self {
            native,
            open: false,
            opened: Signal::new(),
            closed: Signal::new(),
        }
    }

    /// Request selection of `position`, reporting re-selections.
    ///
    /// Returns the position to report, or `None` when the request neither
    /// raised a native callback nor landed on the already-current position.
    pub fn select(&mut self, position: usize, animate: bool) -> Option<usize> {
        let before = self.native.selected_position();
        let raised = self.native.select(position, animate);
        let after = self.native.selected_position();

        if raised {
            return Some(after);
        }
        if after == position && position == before {
            // The native control swallowed a same-position request; surface
            // it so repeated choices of the same item stay observable.
            tracing::trace!(
                target: "spindle::widget",
                position,
                "synthesizing re-selection event"
            );
            return Some(position);
        }
        None
    }

    /// Open the dropdown list.
    pub fn open(&mut self) {
        self.open = true;
        self.opened.emit(());
        self.native.show_overlay();
    }

    /// Record that the dropdown list closed. No-op while already closed.
    pub fn notify_closed(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.closed.emit(());
    }

    /// Window focus changed. Regaining focus while the list is open means
    /// the platform dismissed the overlay, so the close is delivered here.
    pub fn window_focus_changed(&mut self, has_focus: bool) {
        if has_focus && self.open {
            self.notify_closed();
        }
    }

    /// Whether the dropdown list is currently open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The native control's current position.
    pub fn selected_position(&self) -> usize {
        self.native.selected_position()
    }

    /// Whether the native control accepts input.
    pub fn is_enabled(&self) -> bool {
        self.native.is_enabled()
    }

    /// Enable or disable the native control.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.native.set_enabled(enabled);
    }

    /// Forward the row count to the native control.
    pub fn set_row_count(&mut self, rows: usize) {
        self.native.set_row_count(rows);
    }
}
