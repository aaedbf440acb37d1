/// Outcome of one [`Incremental::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// A checkpoint was reached; the value is a completion percentage in
    /// `0.0..=100.0`. It is a hint only and never signals completion.
    Progress(f64),
    /// All work is done. Further steps keep returning `Done`.
    Done,
}

/// A computation that suspends at checkpoints to report progress.
///
/// Polling never changes the result: `finish` on a fresh value and `finish`
/// after any number of `step` calls produce the same output.
pub trait Incremental: Sized {
    /// The value produced once all work is done.
    type Output;

    /// Run until the next checkpoint or until the work is complete.
    fn step(&mut self) -> Step;

    /// Complete any remaining work and return the result.
    fn finish(self) -> Self::Output;

    /// Drive to completion, handing every progress value to `on_progress`.
    fn run(mut self, mut on_progress: impl FnMut(f64)) -> Self::Output {
        while let Step::Progress(p) = self.step() {
            on_progress(p);
        }
        self.finish()
    }
}
