//! Event handlers.

pub mod dispatcher;

pub use dispatcher::*;
