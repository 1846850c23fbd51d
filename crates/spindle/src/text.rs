//! Text rendering for spinner items.
//!
//! [`TextDelegate`] is the built-in delegate for items that render as a
//! single line of text. Items opt in through [`SpinnerText`] rather than
//! `Display` so a host type can keep an unrelated `Display` impl.

use crate::holder::ViewHolder;
use crate::role::RoleDelegate;
use crate::view::{ViewArena, ViewTemplate};

/// Tag carried by the text node of rows inflated by [`TextDelegate`].
pub const TEXT_TAG: &str = "spinner-text";

/// Conversion of an item to its spinner line.
pub trait SpinnerText {
    /// The single line of text shown for this item.
    fn spinner_text(&self) -> String;
}

impl SpinnerText for String {
    fn spinner_text(&self) -> String {
        self.clone()
    }
}

impl SpinnerText for &str {
    fn spinner_text(&self) -> String {
        (*self).to_string()
    }
}

/// Built-in delegate rendering each role as one line of text.
///
/// Collapsed roles use a bare text node. Dropdown rows wrap the text node in
/// a container so styling layers can decorate rows independently of the
/// collapsed widget. An empty-data dropdown row falls back to
/// [`empty_text`](Self::with_empty_text) when no placeholder is configured.
pub struct TextDelegate {
    empty_text: String,
}

impl TextDelegate {
    /// Create a delegate with an empty fallback line.
    pub fn new() -> Self {
        Self {
            empty_text: String::new(),
        }
    }

    /// Set the text shown when there is neither an item nor a placeholder.
    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    fn summary_holder(&self, arena: &mut ViewArena) -> ViewHolder {
        let root = arena.inflate(&ViewTemplate::text("").with_tag(TEXT_TAG));
        ViewHolder::new(arena, root)
    }

    fn line_for<T: SpinnerText>(&self, item: Option<&T>) -> String {
        item.map(SpinnerText::spinner_text)
            .unwrap_or_else(|| self.empty_text.clone())
    }
}

impl Default for TextDelegate {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SpinnerText + Send + Sync> RoleDelegate<T> for TextDelegate {
    fn create_placeholder(&self, arena: &mut ViewArena) -> ViewHolder {
        self.summary_holder(arena)
    }

    fn bind_placeholder(
        &self,
        arena: &mut ViewArena,
        holder: &ViewHolder,
        placeholder: Option<&T>,
    ) {
        let _ = arena.set_text(holder.content, self.line_for(placeholder));
    }

    fn create_selected(&self, arena: &mut ViewArena) -> ViewHolder {
        self.summary_holder(arena)
    }

    fn bind_selected(
        &self,
        arena: &mut ViewArena,
        holder: &ViewHolder,
        _position: usize,
        item: &T,
    ) {
        let _ = arena.set_text(holder.content, item.spinner_text());
    }

    fn create_dropdown(&self, arena: &mut ViewArena) -> ViewHolder {
        let template = ViewTemplate::container([ViewTemplate::text("").with_tag(TEXT_TAG)]);
        let root = arena.inflate(&template);
        let content = arena
            .find_tagged(root, TEXT_TAG)
            .unwrap_or(root);
        ViewHolder::with_content(arena, root, content)
    }

    fn bind_dropdown(
        &self,
        arena: &mut ViewArena,
        holder: &ViewHolder,
        _position: usize,
        item: Option<&T>,
        _is_placeholder: bool,
    ) {
        let _ = arena.set_text(holder.content, self.line_for(item));
    }
}
