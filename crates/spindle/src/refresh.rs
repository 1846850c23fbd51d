//! Refresh-on-reselect spinner wrapper.

use std::ops::{Deref, DerefMut};

use spindle_core::Signal;

use crate::role::RoleDelegate;
use crate::text::{SpinnerText, TextDelegate};
use crate::widget::Spinner;

/// A [`Spinner`] that turns re-selection into a refresh request.
///
/// Choosing the already-committed item again is a natural "reload this"
/// gesture. This wrapper watches the selection stream and raises
/// [`refresh_requested`](Self::refresh_requested) whenever the committed
/// item is selected a second time in a row, while an optional busy flag
/// lets hosts tie an indicator to an in-flight reload.
///
/// The wrapper derefs to the inner [`Spinner`], so the full widget surface
/// stays available.
pub struct RefreshableSpinner<T: Clone + PartialEq + Send + Sync + 'static> {
    inner: Spinner<T>,
    refresh_visible: bool,

    /// Emitted when the committed item is selected again.
    pub refresh_requested: Signal<()>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> RefreshableSpinner<T> {
    /// Wrap a spinner rendering through `delegate`.
    ///
    /// # Panics
    ///
    /// Panics if the global object registry is not initialized.
    pub fn new(delegate: Box<dyn RoleDelegate<T>>) -> Self {
        Self {
            inner: Spinner::new(delegate),
            refresh_visible: false,
            refresh_requested: Signal::new(),
        }
    }

    /// Select the item at `position`, detecting re-selection.
    ///
    /// Delegates to [`Spinner::set_selected_position`] and raises
    /// [`refresh_requested`](Self::refresh_requested) when `position` is
    /// where the committed item already sits. The committed item is looked
    /// up fresh on every call, so selections made through the inner widget
    /// count too.
    pub fn select(&mut self, position: usize) {
        let committed = self
            .inner
            .selected_item()
            .and_then(|item| self.inner.adapter().position_of(&item));
        let repeat = committed == Some(position);
        self.inner.set_selected_position(position);
        if repeat && self.inner.has_selection() {
            tracing::debug!(target: "spindle::widget", position, "refresh requested");
            self.refresh_requested.emit(());
        }
    }

    /// Raise [`refresh_requested`](Self::refresh_requested) directly.
    pub fn request_refresh(&self) {
        self.refresh_requested.emit(());
    }

    /// Whether the refresh indicator should be visible.
    pub fn is_refresh_visible(&self) -> bool {
        self.refresh_visible
    }

    /// Show or hide the refresh indicator.
    pub fn set_refresh_visible(&mut self, visible: bool) {
        self.refresh_visible = visible;
    }

    /// The wrapped spinner.
    pub fn inner(&self) -> &Spinner<T> {
        &self.inner
    }
}

impl<T: SpinnerText + Clone + PartialEq + Send + Sync + 'static> RefreshableSpinner<T> {
    /// Wrap a spinner using the built-in [`TextDelegate`].
    pub fn with_text_delegate() -> Self {
        Self::new(Box::new(TextDelegate::new()))
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Deref for RefreshableSpinner<T> {
    type Target = Spinner<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> DerefMut for RefreshableSpinner<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
