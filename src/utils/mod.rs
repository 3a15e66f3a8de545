//! Small cross-cutting helpers: file system primitives and path hygiene.

pub mod fs;
pub mod paths;
