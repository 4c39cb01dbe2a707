//! Small platform helpers.

/// Returns the number of logical CPU cores available on the system.
///
/// Guaranteed to return a value ≥ 1 (falls back to 1 if the platform can't
/// report it).
pub fn count_cores() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
