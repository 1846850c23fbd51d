//! Spindle - a single-choice spinner widget with placeholder support.
//!
//! Spindle models the state machine behind a dropdown single-choice widget:
//! a collapsed row showing either a placeholder or the committed item, a
//! recycling adapter rendering rows through a delegate, re-selection events
//! when the same item is chosen again, and open/close tracking for the
//! dropdown list.
//!
//! # Example
//!
//! ```
//! use spindle::prelude::*;
//!
//! init_global_registry();
//!
//! let mut spinner = Spinner::with_text_delegate().with_default_selection(false);
//! spinner.set_placeholder("Pick a fruit".to_string());
//! spinner.set_data(vec!["Apple".to_string(), "Banana".to_string()]);
//!
//! spinner.item_selected.connect(|(position, item)| {
//!     println!("Selected {:?} at {}", item, position);
//! });
//!
//! spinner.set_selected_item(&"Apple".to_string());
//! assert_eq!(spinner.selected_item(), Some("Apple".to_string()));
//! ```

pub use spindle_core::*;

pub mod adapter;
pub mod choice;
pub mod holder;
pub mod prelude;
pub mod refresh;
pub mod role;
pub mod selection;
pub mod text;
pub mod view;
pub mod widget;
