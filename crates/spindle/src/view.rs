//! Retained view tree for spinner rendering.
//!
//! Views are lightweight retained nodes stored in an arena. Delegates inflate
//! [`ViewTemplate`]s into the arena and later rebind text on the resulting
//! nodes; the spinner recycles nodes across renders instead of re-inflating.
//!
//! # Key Types
//!
//! - [`ViewArena`] - Arena storage for all live view nodes
//! - [`ViewId`] - Stable handle to a node in the arena
//! - [`ViewTemplate`] - Declarative description of a subtree to inflate
//! - [`ViewError`] - Errors for operations on dead handles

use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

new_key_type! {
    /// A stable handle to a view node in a [`ViewArena`].
    ///
    /// Handles stay valid until the node is released; a handle to a released
    /// node yields [`ViewError::DeadView`] from fallible accessors.
    pub struct ViewId;
}

/// Errors for view arena operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The view handle does not refer to a live node.
    #[error("view handle refers to a released or unknown node")]
    DeadView,
}

/// The kind of a view node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// A node that holds child views.
    Container,
    /// A leaf node carrying a text run.
    Text,
}

/// A declarative description of a view subtree.
///
/// Templates are cheap to construct and are inflated into a [`ViewArena`]
/// by delegates. A template can tag nodes so the inflated subtree can be
/// searched with [`ViewArena::find_tagged`].
///
/// # Example
///
/// ```
/// use spindle::view::{ViewArena, ViewTemplate};
///
/// let template = ViewTemplate::container([
///     ViewTemplate::text("label").with_tag("title"),
/// ]);
///
/// let mut arena = ViewArena::new();
/// let root = arena.inflate(&template);
/// let title = arena.find_tagged(root, "title").unwrap();
/// assert_eq!(arena.text(title).unwrap(), "label");
/// ```
#[derive(Debug, Clone)]
pub struct ViewTemplate {
    kind: ViewKind,
    tag: Option<&'static str>,
    text: String,
    children: Vec<ViewTemplate>,
}

impl ViewTemplate {
    /// Create a text leaf template.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: ViewKind::Text,
            tag: None,
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Create a container template with the given children.
    pub fn container(children: impl IntoIterator<Item = ViewTemplate>) -> Self {
        Self {
            kind: ViewKind::Container,
            tag: None,
            text: String::new(),
            children: children.into_iter().collect(),
        }
    }

    /// Attach a lookup tag to this node.
    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Replace the text of this node.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// A single retained view node.
struct ViewNode {
    kind: ViewKind,
    tag: Option<&'static str>,
    text: String,
    children: Vec<ViewId>,
}

/// Arena storage for retained view nodes.
///
/// All nodes of a spinner live in one arena, owned by the widget. Delegates
/// receive `&mut ViewArena` when creating or binding holders.
pub struct ViewArena {
    nodes: SlotMap<ViewId, ViewNode>,
}

impl ViewArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Inflate a template into the arena, returning the root node handle.
    pub fn inflate(&mut self, template: &ViewTemplate) -> ViewId {
        let children: Vec<ViewId> = template
            .children
            .iter()
            .map(|child| self.inflate(child))
            .collect();
        self.nodes.insert(ViewNode {
            kind: template.kind,
            tag: template.tag,
            text: template.text.clone(),
            children,
        })
    }

    /// Release a node and its entire subtree.
    ///
    /// Releasing an already-dead handle is a no-op.
    pub fn release(&mut self, id: ViewId) {
        let children = match self.nodes.remove(id) {
            Some(node) => node.children,
            None => return,
        };
        for child in children {
            self.release(child);
        }
    }

    /// Check whether a handle refers to a live node.
    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the kind of a node.
    pub fn kind(&self, id: ViewId) -> Result<ViewKind, ViewError> {
        self.nodes.get(id).map(|n| n.kind).ok_or(ViewError::DeadView)
    }

    /// Get the text of a node.
    pub fn text(&self, id: ViewId) -> Result<&str, ViewError> {
        self.nodes
            .get(id)
            .map(|n| n.text.as_str())
            .ok_or(ViewError::DeadView)
    }

    /// Set the text of a node.
    pub fn set_text(&mut self, id: ViewId, text: impl Into<String>) -> Result<(), ViewError> {
        self.nodes
            .get_mut(id)
            .map(|n| n.text = text.into())
            .ok_or(ViewError::DeadView)
    }

    /// Get the children of a node.
    pub fn children(&self, id: ViewId) -> Result<&[ViewId], ViewError> {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .ok_or(ViewError::DeadView)
    }

    /// Find the first node in a subtree carrying the given tag (depth-first,
    /// root included).
    pub fn find_tagged(&self, root: ViewId, tag: &str) -> Option<ViewId> {
        let node = self.nodes.get(root)?;
        if node.tag == Some(tag) {
            return Some(root);
        }
        for &child in &node.children {
            if let Some(found) = self.find_tagged(child, tag) {
                return Some(found);
            }
        }
        None
    }

    /// Debug dump of a subtree.
    pub fn dump(&self, root: ViewId) -> String {
        let mut output = String::new();
        self.dump_recursive(root, 0, &mut output);
        output
    }

    fn dump_recursive(&self, id: ViewId, depth: usize, output: &mut String) {
        let indent = "  ".repeat(depth);
        let Some(node) = self.nodes.get(id) else {
            output.push_str(&format!("{indent}(dead)\n"));
            return;
        };
        let tag = node.tag.unwrap_or("-");
        match node.kind {
            ViewKind::Text => {
                output.push_str(&format!("{indent}Text[{tag}] {:?}\n", node.text));
            }
            ViewKind::Container => {
                output.push_str(&format!("{indent}Container[{tag}]\n"));
            }
        }
        for &child in &node.children {
            self.dump_recursive(child, depth + 1, output);
        }
    }
}

impl Default for ViewArena {
    fn default() -> Self {
        Self::new()
    }
}
