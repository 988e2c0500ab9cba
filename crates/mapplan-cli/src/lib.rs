//! Library components of the `mapplan` binary.

pub mod logging;
pub mod render;
pub mod summary;
