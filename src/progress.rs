// src/progress.rs
/// Lightweight progress reporting used by the fetch and extract loops.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items, if known.
    fn begin(&mut self, _total: Option<usize>) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One identifier or document completed.
    fn item_done(&mut self, _id: &str) {}

    /// One identifier or document failed; the loop continues.
    fn item_failed(&mut self, _id: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
