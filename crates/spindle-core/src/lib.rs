//! Core systems for Spindle.
//!
//! This crate provides the foundational components of the Spindle widget
//! library:
//!
//! - **Object Model**: Parent-child ownership, naming, stable identifiers
//! - **Signal/Slot System**: Type-safe inter-object communication
//! - **Logging**: `tracing` integration and object-tree visualization
//!
//! # Signal/Slot Example
//!
//! ```
//! use spindle_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Object Example
//!
//! ```
//! use spindle_core::{Object, ObjectBase, ObjectId, init_global_registry};
//!
//! init_global_registry();
//!
//! struct Counter {
//!     base: ObjectBase,
//!     value: i32,
//! }
//!
//! impl Counter {
//!     fn new() -> Self {
//!         Self {
//!             base: ObjectBase::new::<Self>(),
//!             value: 0,
//!         }
//!     }
//! }
//!
//! impl Object for Counter {
//!     fn object_id(&self) -> ObjectId {
//!         self.base.id()
//!     }
//! }
//!
//! let counter = Counter::new();
//! counter.base.set_name("counter");
//! assert_eq!(counter.value, 0);
//! ```

mod error;
pub mod logging;
pub mod object;
pub mod signal;

pub use error::{CoreError, Result};
pub use logging::{ObjectTreeDebug, TreeFormatOptions, TreeStyle};
pub use object::{
    Object, ObjectBase, ObjectError, ObjectId, ObjectRegistry, ObjectResult, SharedObjectRegistry,
    global_registry, init_global_registry,
};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
