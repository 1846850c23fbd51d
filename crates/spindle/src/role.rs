//! Rendering roles and the role delegate contract.
//!
//! A spinner renders rows in three distinct roles and a delegate decides what
//! each role looks like. The collapsed widget shows either the placeholder
//! role (no committed selection) or the selected role (a committed item); the
//! open list always renders the dropdown role, even when the only row shown
//! is the placeholder standing in for an empty data set.
//!
//! Implement [`RoleDelegate`] for full control over all three roles, or
//! [`SimpleRoleDelegate`] when every role shares one layout and only the
//! bound content differs.

use std::fmt;

use crate::holder::ViewHolder;
use crate::view::ViewArena;

/// The role a row is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Collapsed widget with no committed selection.
    Placeholder,
    /// Collapsed widget showing the committed item.
    Selected,
    /// A row inside the open list.
    Dropdown,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => write!(f, "placeholder"),
            Self::Selected => write!(f, "selected"),
            Self::Dropdown => write!(f, "dropdown"),
        }
    }
}

/// Per-role view construction and binding.
///
/// Each role splits into a `create_*` method, called once when a fresh holder
/// is needed, and a `bind_*` method, called on every render against a holder
/// created for the same role. Holders created for one role are never bound
/// through another role's `bind_*` method, with one exception: a holder
/// created for [`Role::Selected`] may receive [`bind_placeholder`] when the
/// committed position fell off the end of a shrunk data set.
///
/// [`bind_placeholder`]: RoleDelegate::bind_placeholder
pub trait RoleDelegate<T>: Send + Sync {
    /// Build a fresh holder for the placeholder role.
    fn create_placeholder(&self, arena: &mut ViewArena) -> ViewHolder;

    /// Bind the placeholder content. `placeholder` is the configured
    /// placeholder item, if any.
    fn bind_placeholder(&self, arena: &mut ViewArena, holder: &ViewHolder, placeholder: Option<&T>);

    /// Build a fresh holder for the selected role.
    fn create_selected(&self, arena: &mut ViewArena) -> ViewHolder;

    /// Bind the committed item into a selected-role holder.
    fn bind_selected(&self, arena: &mut ViewArena, holder: &ViewHolder, position: usize, item: &T);

    /// Build a fresh holder for a dropdown row.
    fn create_dropdown(&self, arena: &mut ViewArena) -> ViewHolder;

    /// Bind a dropdown row.
    ///
    /// When the data set is empty the list still shows one row; that call
    /// arrives with `item` set to the configured placeholder (or `None`) and
    /// `is_placeholder` set to `true`.
    fn bind_dropdown(
        &self,
        arena: &mut ViewArena,
        holder: &ViewHolder,
        position: usize,
        item: Option<&T>,
        is_placeholder: bool,
    );
}

/// A single-layout delegate.
///
/// Use this when all three roles share one view structure. Wrap the
/// implementation in [`SimpleDelegate`] to obtain a full [`RoleDelegate`];
/// the role only influences which arguments arrive at
/// [`bind_row`](Self::bind_row).
pub trait SimpleRoleDelegate<T>: Send + Sync {
    /// Build the shared row holder.
    fn create_row(&self, arena: &mut ViewArena) -> ViewHolder;

    /// Bind a row. `item` is `None` for placeholder content.
    fn bind_row(
        &self,
        arena: &mut ViewArena,
        holder: &ViewHolder,
        position: usize,
        item: Option<&T>,
        is_placeholder: bool,
    );
}

/// Adapter lifting a [`SimpleRoleDelegate`] into a [`RoleDelegate`].
pub struct SimpleDelegate<D>(D);

impl<D> SimpleDelegate<D> {
    /// Wrap a single-layout delegate.
    pub fn new(delegate: D) -> Self {
        Self(delegate)
    }

    /// The wrapped delegate.
    pub fn inner(&self) -> &D {
        &self.0
    }
}

impl<T, D: SimpleRoleDelegate<T>> RoleDelegate<T> for SimpleDelegate<D> {
    fn create_placeholder(&self, arena: &mut ViewArena) -> ViewHolder {
        self.0.create_row(arena)
    }

    fn bind_placeholder(
        &self,
        arena: &mut ViewArena,
        holder: &ViewHolder,
        placeholder: Option<&T>,
    ) {
        self.0.bind_row(arena, holder, 0, placeholder, true);
    }

    fn create_selected(&self, arena: &mut ViewArena) -> ViewHolder {
        self.0.create_row(arena)
    }

    fn bind_selected(&self, arena: &mut ViewArena, holder: &ViewHolder, position: usize, item: &T) {
        self.0.bind_row(arena, holder, position, Some(item), false);
    }

    fn create_dropdown(&self, arena: &mut ViewArena) -> ViewHolder {
        self.0.create_row(arena)
    }

    fn bind_dropdown(
        &self,
        arena: &mut ViewArena,
        holder: &ViewHolder,
        position: usize,
        item: Option<&T>,
        is_placeholder: bool,
    ) {
        self.0.bind_row(arena, holder, position, item, is_placeholder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewTemplate;

    struct PlainDelegate;

    impl SimpleRoleDelegate<String> for PlainDelegate {
        fn create_row(&self, arena: &mut ViewArena) -> ViewHolder {
            let root = arena.inflate(&ViewTemplate::text(""));
            ViewHolder::new(arena, root)
        }

        fn bind_row(
            &self,
            arena: &mut ViewArena,
            holder: &ViewHolder,
            position: usize,
            item: Option<&String>,
            is_placeholder: bool,
        ) {
            let text = match item {
                Some(item) if !is_placeholder => format!("{position}: {item}"),
                Some(item) => item.clone(),
                None => String::new(),
            };
            let _ = arena.set_text(holder.content, text);
        }
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Placeholder.to_string(), "placeholder");
        assert_eq!(Role::Selected.to_string(), "selected");
        assert_eq!(Role::Dropdown.to_string(), "dropdown");
    }

    #[test]
    fn test_simple_delegate_covers_all_roles() {
        let delegate = SimpleDelegate::new(PlainDelegate);
        let mut arena = ViewArena::new();
        let item = "apple".to_string();

        let selected = delegate.create_selected(&mut arena);
        delegate.bind_selected(&mut arena, &selected, 2, &item);
        assert_eq!(arena.text(selected.content).unwrap(), "2: apple");

        let dropdown = delegate.create_dropdown(&mut arena);
        delegate.bind_dropdown(&mut arena, &dropdown, 0, Some(&item), false);
        assert_eq!(arena.text(dropdown.content).unwrap(), "0: apple");

        let placeholder = delegate.create_placeholder(&mut arena);
        delegate.bind_placeholder(&mut arena, &placeholder, Some(&item));
        assert_eq!(arena.text(placeholder.content).unwrap(), "apple");

        delegate.bind_placeholder(&mut arena, &placeholder, None);
        assert_eq!(arena.text(placeholder.content).unwrap(), "");
    }
}
