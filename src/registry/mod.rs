//! Per-instance subscription storage and synchronous dispatch.
//!
//! A [`Registry`] maps event names to keyed callbacks and invokes them in
//! registration order when an event is triggered.

mod registry;

pub use registry::Registry;
