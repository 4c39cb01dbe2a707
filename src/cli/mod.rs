//! Command-line surface: a single positional archive path plus a handful of
//! flags controlling verbosity and worker count.

pub mod args;
pub mod constants;

pub use args::{parse, Args};
