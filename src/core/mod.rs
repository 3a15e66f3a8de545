//! Core types shared across the crate: the error enum and the
//! continuation-state signal consumed by the command layer.

pub mod error;

pub use error::{Continuation, SpmError};
