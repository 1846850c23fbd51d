//! Recycling adapter between item data and spinner views.
//!
//! The adapter owns the item list, the optional placeholder item, and the
//! collapsed-state flag, and renders rows through a [`RoleDelegate`]. Every
//! inflated row is cached with the role it was created for; a recycled view
//! is rebound in place when the requested role matches and replaced when it
//! does not.
//!
//! Interior mutability follows the model layer convention: mutators take
//! `&self` and synchronize through `RwLock`, so an adapter can be shared with
//! observers that only hold `&SpinnerAdapter`.

use parking_lot::RwLock;
use slotmap::SecondaryMap;

use spindle_core::Signal;

use crate::holder::ViewHolder;
use crate::role::{Role, RoleDelegate};
use crate::view::{ViewArena, ViewId};

/// Signals emitted by [`SpinnerAdapter`].
pub struct AdapterSignals {
    /// Item content changed in place; cached rows stay valid and rebind.
    pub data_changed: Signal<()>,
    /// The data set was replaced wholesale; cached rows were invalidated.
    pub model_reset: Signal<()>,
}

impl AdapterSignals {
    fn new() -> Self {
        Self {
            data_changed: Signal::new(),
            model_reset: Signal::new(),
        }
    }
}

/// Cache entry for one inflated row.
struct Binding {
    role: Role,
    holder: ViewHolder,
}

/// Adapter backing a spinner with a list of items.
///
/// # Row Count
///
/// The adapter never reports zero rows: an empty data set still yields one
/// row so the open list can show the placeholder. [`count`](Self::count) is
/// therefore `max(1, len)`.
///
/// # Collapsed Rendering
///
/// [`summary_view`](Self::summary_view) renders the collapsed widget. It
/// produces the placeholder role while the data set is empty or no selection
/// has been committed, and the selected role otherwise. A committed position
/// that no longer exists in the data falls back to placeholder content
/// without discarding the cached row.
pub struct SpinnerAdapter<T> {
    data: RwLock<Vec<T>>,
    placeholder: RwLock<Option<T>>,
    /// Whether the collapsed widget shows a committed item. Starts true;
    /// the widget drops it when it decides to show the placeholder.
    selected: RwLock<bool>,
    delegate: Box<dyn RoleDelegate<T>>,
    signals: AdapterSignals,
    bindings: RwLock<SecondaryMap<ViewId, Binding>>,
}

impl<T> SpinnerAdapter<T> {
    /// Create an empty adapter rendering through `delegate`.
    pub fn new(delegate: Box<dyn RoleDelegate<T>>) -> Self {
        Self {
            data: RwLock::new(Vec::new()),
            placeholder: RwLock::new(None),
            selected: RwLock::new(true),
            delegate,
            signals: AdapterSignals::new(),
            bindings: RwLock::new(SecondaryMap::new()),
        }
    }

    /// The adapter's signals.
    pub fn signals(&self) -> &AdapterSignals {
        &self.signals
    }

    // ========================================================================
    // Data access
    // ========================================================================

    /// Number of rows the open list shows. Never zero.
    pub fn count(&self) -> usize {
        self.data.read().len().max(1)
    }

    /// Number of items in the data set.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the data set holds no items.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Whether the collapsed widget currently shows a committed item.
    pub fn is_selected(&self) -> bool {
        *self.selected.read()
    }

    /// Set whether the collapsed widget shows a committed item.
    pub fn set_selected(&self, selected: bool) {
        *self.selected.write() = selected;
        self.signals.data_changed.emit(());
    }

    /// Set the placeholder item shown when nothing is committed.
    pub fn set_placeholder(&self, placeholder: T) {
        *self.placeholder.write() = Some(placeholder);
        self.signals.data_changed.emit(());
    }

    /// Remove the placeholder item.
    pub fn clear_placeholder(&self) {
        *self.placeholder.write() = None;
        self.signals.data_changed.emit(());
    }

    /// Replace the data set.
    ///
    /// Cached item rows are invalidated; the next render re-creates them.
    /// Placeholder rows carry no item content and survive the swap. Emits
    /// `model_reset`.
    pub fn set_data(&self, items: Vec<T>) {
        {
            let mut data = self.data.write();
            data.clear();
            data.extend(items);
        }
        self.bindings
            .write()
            .retain(|_, binding| binding.role == Role::Placeholder);
        tracing::debug!(
            target: "spindle::adapter",
            len = self.data.read().len(),
            "data set replaced"
        );
        self.signals.model_reset.emit(());
    }

    /// Mutate one item in place.
    ///
    /// Returns `true` if the index was valid. Cached rows stay live and are
    /// rebound on the next render. Emits `data_changed` on success.
    pub fn modify(&self, index: usize, f: impl FnOnce(&mut T)) -> bool {
        let changed = {
            let mut data = self.data.write();
            match data.get_mut(index) {
                Some(item) => {
                    f(item);
                    true
                }
                None => false,
            }
        };
        if changed {
            self.signals.data_changed.emit(());
        }
        changed
    }

    /// Append an item. Emits `data_changed`.
    pub fn push(&self, item: T) {
        self.data.write().push(item);
        self.signals.data_changed.emit(());
    }

    /// Remove an item by index. Emits `data_changed` on success.
    pub fn remove(&self, index: usize) -> Option<T> {
        let removed = {
            let mut data = self.data.write();
            if index < data.len() {
                Some(data.remove(index))
            } else {
                None
            }
        };
        if removed.is_some() {
            self.signals.data_changed.emit(());
        }
        removed
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the collapsed widget, recycling `recycled` when possible.
    ///
    /// Returns the root view of the rendered row. `position` is the committed
    /// position; it is only consulted when the selected role renders.
    pub fn summary_view(
        &self,
        arena: &mut ViewArena,
        position: usize,
        recycled: Option<ViewId>,
    ) -> ViewId {
        let needed = if self.is_empty() || !self.is_selected() {
            Role::Placeholder
        } else {
            Role::Selected
        };
        let holder = self.obtain(arena, needed, recycled);

        match needed {
            Role::Placeholder => {
                let placeholder = self.placeholder.read();
                self.delegate
                    .bind_placeholder(arena, &holder, placeholder.as_ref());
            }
            Role::Selected => {
                let data = self.data.read();
                match data.get(position) {
                    Some(item) => {
                        self.delegate.bind_selected(arena, &holder, position, item);
                    }
                    None => {
                        // Committed position fell off a shrunk data set;
                        // render placeholder content in the cached row.
                        drop(data);
                        tracing::debug!(
                            target: "spindle::adapter",
                            position,
                            "selected position out of bounds, showing placeholder"
                        );
                        let placeholder = self.placeholder.read();
                        self.delegate
                            .bind_placeholder(arena, &holder, placeholder.as_ref());
                    }
                }
            }
            Role::Dropdown => unreachable!("summary never renders the dropdown role"),
        }

        holder.root
    }

    /// Render one row of the open list, recycling `recycled` when possible.
    ///
    /// With an empty data set the single visible row binds the placeholder
    /// with `is_placeholder = true`.
    pub fn dropdown_view(
        &self,
        arena: &mut ViewArena,
        index: usize,
        recycled: Option<ViewId>,
    ) -> ViewId {
        let holder = self.obtain(arena, Role::Dropdown, recycled);

        if self.is_empty() {
            let placeholder = self.placeholder.read();
            self.delegate
                .bind_dropdown(arena, &holder, 0, placeholder.as_ref(), true);
        } else {
            let data = self.data.read();
            self.delegate
                .bind_dropdown(arena, &holder, index, data.get(index), false);
        }

        holder.root
    }

    /// Drop the cache entry for a row the widget released.
    pub fn discard(&self, view: ViewId) {
        self.bindings.write().remove(view);
    }

    /// Reuse the recycled row when its cached role matches, otherwise replace
    /// it with a freshly created holder.
    fn obtain(&self, arena: &mut ViewArena, needed: Role, recycled: Option<ViewId>) -> ViewHolder {
        if let Some(view) = recycled {
            let cached = self.bindings.read().get(view).map(|b| (b.role, b.holder));
            match cached {
                Some((role, holder)) if role == needed && arena.contains(holder.root) => {
                    return holder;
                }
                _ => {
                    tracing::trace!(
                        target: "spindle::adapter",
                        role = %needed,
                        "recycled view unusable, creating fresh holder"
                    );
                    self.bindings.write().remove(view);
                    arena.release(view);
                }
            }
        }

        let holder = match needed {
            Role::Placeholder => self.delegate.create_placeholder(arena),
            Role::Selected => self.delegate.create_selected(arena),
            Role::Dropdown => self.delegate.create_dropdown(arena),
        };
        self.bindings.write().insert(
            holder.root,
            Binding {
                role: needed,
                holder,
            },
        );
        holder
    }
}

impl<T: Clone> SpinnerAdapter<T> {
    /// Snapshot of the data set.
    pub fn data(&self) -> Vec<T> {
        self.data.read().clone()
    }

    /// Clone of the item at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.data.read().get(index).cloned()
    }

    /// Clone of the configured placeholder item.
    pub fn placeholder(&self) -> Option<T> {
        self.placeholder.read().clone()
    }
}

impl<T: PartialEq> SpinnerAdapter<T> {
    /// Position of the first item equal to `item`.
    pub fn position_of(&self, item: &T) -> Option<usize> {
        self.data.read().iter().position(|candidate| candidate == item)
    }

    /// Whether the data set contains an item equal to `item`.
    pub fn contains_item(&self, item: &T) -> bool {
        self.position_of(item).is_some()
    }
}
