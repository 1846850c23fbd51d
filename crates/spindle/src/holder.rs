//! View holder for recycled spinner rows.

use crate::view::{ViewArena, ViewId};

/// A handle pair caching the views of one inflated row.
///
/// Holders are created once per row by a delegate and cached on the adapter
/// so that re-renders rebind an existing subtree instead of inflating a new
/// one. `root` is the row's subtree root; `content` is the node the delegate
/// writes into on each bind (often a tagged descendant of `root`, but it may
/// equal `root` for single-node rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewHolder {
    /// Root of the row subtree.
    pub root: ViewId,
    /// The node rebound on each render.
    pub content: ViewId,
}

impl ViewHolder {
    /// Create a holder whose content is the row root itself.
    ///
    /// # Panics
    ///
    /// Panics if `root` is not a live node in `arena`. A holder over a dead
    /// view is a construction bug in the calling delegate, not a recoverable
    /// condition.
    pub fn new(arena: &ViewArena, root: ViewId) -> Self {
        assert!(
            arena.contains(root),
            "ViewHolder requires a live root view"
        );
        Self {
            root,
            content: root,
        }
    }

    /// Create a holder with a distinct content node.
    ///
    /// # Panics
    ///
    /// Panics if either handle is dead in `arena`.
    pub fn with_content(arena: &ViewArena, root: ViewId, content: ViewId) -> Self {
        assert!(
            arena.contains(root) && arena.contains(content),
            "ViewHolder requires live root and content views"
        );
        Self { root, content }
    }
}
