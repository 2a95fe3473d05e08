// src/progress.rs
/// Lightweight progress reporting used by the collector.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of inputs (schools + seats).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One input (a school or a seat) finished.
    fn item_done(&mut self, _label: &str) {}

    /// One input produced nothing.
    fn item_failed(&mut self, _label: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
