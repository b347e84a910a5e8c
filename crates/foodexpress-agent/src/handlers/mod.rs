//! Event handlers, one module per event domain.

pub mod fetch;
pub mod lifecycle;
pub mod push;
pub mod sync;
