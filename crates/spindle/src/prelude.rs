//! Prelude module for Spindle.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use spindle::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal/slot system (`Signal`, `ConnectionId`)
//! - Object system (`Object`, `ObjectBase`, `init_global_registry`)
//! - The spinner widgets (`Spinner`, `TextSpinner`, `RefreshableSpinner`)
//! - The delegate contract (`Role`, `RoleDelegate`, `SimpleRoleDelegate`)
//! - The view layer (`ViewArena`, `ViewId`, `ViewTemplate`, `ViewHolder`)

// ============================================================================
// Signal/Slot System
// ============================================================================

pub use crate::signal::{ConnectionGuard, ConnectionId, Signal};

// ============================================================================
// Object System
// ============================================================================

pub use crate::object::{Object, ObjectBase, ObjectId, init_global_registry};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::refresh::RefreshableSpinner;
pub use crate::widget::{Spinner, TextSpinner};

// ============================================================================
// Adapter and Delegates
// ============================================================================

pub use crate::adapter::{AdapterSignals, SpinnerAdapter};
pub use crate::role::{Role, RoleDelegate, SimpleDelegate, SimpleRoleDelegate};
pub use crate::text::{SpinnerText, TextDelegate};

// ============================================================================
// Choice Control
// ============================================================================

pub use crate::choice::{BasicChoiceControl, ChoiceControl, ReselectControl};

// ============================================================================
// Views
// ============================================================================

pub use crate::holder::ViewHolder;
pub use crate::selection::SelectionState;
pub use crate::view::{ViewArena, ViewError, ViewId, ViewTemplate};
