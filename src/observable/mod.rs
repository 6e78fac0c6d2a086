//! Attaching the registry to host types.
//!
//! [`Observable`] is the capability; the [`mixin!`](crate::mixin) macro
//! applies it to a type that holds a [`Registry`](crate::Registry) field.

mod observable;

pub use observable::Observable;
