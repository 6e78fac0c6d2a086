//! # Microstore
//!
//! Named event subscriptions for plain stateful Rust types.
//!
//! A host type keeps a [`Registry`] as a field and gains three operations:
//! - `bind(event, key, callback)` - register a callback under an event, keyed
//!   so it can be replaced or removed later
//! - `unbind(event, key)` - remove it again (unknown names are ignored)
//! - `trigger(event)` - run every callback for the event, synchronously, in
//!   registration order
//!
//! The [`mixin!`] macro implements [`Observable`] for the host so those
//! operations are callable on the host itself, without any base type.
//!
//! ```
//! use microstore::{mixin, Observable, Registry};
//! use std::sync::RwLock;
//!
//! #[derive(Default)]
//! struct Store {
//!     values: RwLock<Vec<i32>>,
//!     events: Registry,
//! }
//!
//! mixin!(Store, events);
//!
//! impl Store {
//!     fn set_values(&self, values: Vec<i32>) {
//!         // Subscribers hear about the change before it lands.
//!         self.trigger("values.loaded").unwrap();
//!         *self.values.write().unwrap() = values;
//!     }
//! }
//!
//! let store = Store::default();
//! store.bind("values.loaded", "logger", |_| println!("loading"));
//! store.set_values(vec![1, 2, 3]);
//! store.unbind("values.loaded", "logger");
//! ```
//!
//! Dispatch runs over a snapshot of the callbacks taken when `trigger`
//! starts: binds and unbinds made by callbacks take effect on the next
//! trigger. A callback error ends the pass and comes back as a
//! [`TriggerError`].

pub mod error;
pub mod observable;
pub mod registry;

// Re-export main types for convenience
pub use error::{CallbackError, TriggerError};
pub use observable::Observable;
pub use registry::Registry;
