//! Verbosity global and the `displaylevel!` macro used throughout the CLI.

use std::sync::atomic::{AtomicU32, Ordering};

/// Name shown in usage text and error messages.
pub const PROGRAM_NAME: &str = "dbpf-recompress";

// 0 = silent; 1 = errors and summary only; 2 = normal (default); 3 = verbose.
static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Conditionally print a line to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprintln!($($arg)*);
        }
    };
}
