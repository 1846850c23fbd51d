//! Logging and debugging facilities for Spindle.
//!
//! This module provides:
//! - Integration with the `tracing` crate for structured logging
//! - Debug visualization for object trees
//!
//! # Tracing Integration
//!
//! Spindle uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! # Debug Visualization
//!
//! Use [`ObjectTreeDebug`] to get detailed views of the object hierarchy:
//!
//! ```ignore
//! use spindle_core::logging::ObjectTreeDebug;
//!
//! let debug = ObjectTreeDebug::new();
//! println!("{}", debug.format_all().unwrap());
//! ```

use std::fmt::{self, Write as FmtWrite};

use crate::object::{ObjectId, ObjectResult, global_registry};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "spindle_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "spindle_core::signal";
    /// Object model target.
    pub const OBJECT: &str = "spindle_core::object";
    /// Widget layer target.
    pub const WIDGET: &str = "spindle::widget";
    /// Adapter layer target.
    pub const ADAPTER: &str = "spindle::adapter";
}

/// Style options for object tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    Unicode,
    /// Compact single-line representation.
    Compact,
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self::Unicode
    }
}

/// Configuration for object tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show object IDs.
    pub show_ids: bool,
    /// Whether to show type names.
    pub show_types: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_types: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing object trees.
///
/// This provides various methods for inspecting and displaying the
/// object hierarchy in a human-readable format.
#[derive(Debug, Clone)]
pub struct ObjectTreeDebug {
    options: TreeFormatOptions,
}

impl ObjectTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self {
            options: TreeFormatOptions::default(),
        }
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the entire object tree starting from all root objects.
    pub fn format_all(&self) -> ObjectResult<String> {
        let registry = global_registry()?;
        let roots = registry.root_objects();

        let mut output = String::new();
        writeln!(output, "Object Tree ({} total objects):", registry.object_count())
            .expect("write to String");

        if roots.is_empty() {
            writeln!(output, "  (empty)").expect("write to String");
        } else {
            for root_id in roots {
                self.format_subtree_into(root_id, 0, true, &mut output)?;
            }
        }

        Ok(output)
    }

    /// Format a subtree starting from a specific object.
    pub fn format_subtree(&self, root: ObjectId) -> ObjectResult<String> {
        let mut output = String::new();
        self.format_subtree_into(root, 0, true, &mut output)?;
        Ok(output)
    }

    fn format_subtree_into(
        &self,
        id: ObjectId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> ObjectResult<()> {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return Ok(());
            }
        }

        let registry = global_registry()?;
        let name = registry.object_name(id)?;
        let type_name = registry.type_name(id)?;
        let children = registry.children(id)?;

        let prefix = self.build_prefix(depth, is_last);
        output.push_str(&prefix);

        let display_name = if name.is_empty() { "(unnamed)" } else { &name };
        output.push_str(display_name);

        if self.options.show_ids {
            write!(output, " [{:?}]", id).expect("write to String");
        }

        if self.options.show_types {
            // Extract just the type name without the full path for readability
            let short_type = type_name.rsplit("::").next().unwrap_or(type_name);
            write!(output, " ({})", short_type).expect("write to String");
        }

        output.push('\n');

        let child_count = children.len();
        for (i, child_id) in children.into_iter().enumerate() {
            let child_is_last = i == child_count - 1;
            self.format_subtree_into(child_id, depth + 1, child_is_last, output)?;
        }

        Ok(())
    }

    /// Build the prefix string for a tree node.
    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, space) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "   "),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "- ", "- "),
        };

        let mut prefix = String::new();

        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.options.indent_size {
                prefix.push(' ');
            }
        }

        if is_last {
            prefix.push_str(if self.options.style == TreeStyle::Unicode {
                "\u{2514}\u{2500}\u{2500} "
            } else {
                space
            });
        } else {
            prefix.push_str(corner);
            prefix.push(' ');
        }

        prefix
    }
}

impl Default for ObjectTreeDebug {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectTreeDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format_all() {
            Ok(output) => write!(f, "{}", output),
            Err(e) => write!(f, "Error formatting object tree: {}", e),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are just wrappers around the `tracing` crate macros with consistent
/// target naming.
#[macro_export]
macro_rules! spindle_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "spindle_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! spindle_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "spindle_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! spindle_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "spindle_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! spindle_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "spindle_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! spindle_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "spindle_core", $($arg)*)
    };
}
