// src/progress.rs
/// Progress reporting for multi-week runs.
/// Frontends implement this to surface status; the CLI logs through `tracing`.
pub trait Progress {
    /// Called at the start with the number of weeks to process.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One week's document was fetched and extracted.
    fn item_done(&mut self, _week: u32) {}

    /// One week failed and was skipped.
    fn item_failed(&mut self, _week: u32, _error: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
