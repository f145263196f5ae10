/// ProgressReporter port for reporting progress during a run
///
/// User-facing feedback (as opposed to `tracing` diagnostics). Shared by
/// all workers, hence `Send + Sync`.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports batch progress
    ///
    /// # Arguments
    /// * `current` - Plugins finished so far
    /// * `total` - Plugins in the batch
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of the run
    fn report_completion(&self, message: &str);
}
