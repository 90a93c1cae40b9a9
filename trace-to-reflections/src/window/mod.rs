//! Defines [Window]s which perform operations on subintervals of a trace.
//!
//! # Example
//!
//! The following smooths a trace with a centred moving average five samples wide.
//! ```rust
//! use trace_to_reflections::window::{SmoothingWindow, WindowFilter};
//!
//! let raw = [0.0, 5.0, 0.0, 5.0, 0.0];
//! let smoothed: Vec<_> = raw
//!     .into_iter()
//!     .enumerate()
//!     .window(SmoothingWindow::new(2))
//!     .collect();
//! assert_eq!(smoothed[2], (2, 2.0));
//! ```

pub mod smoothing_window;
pub mod tracepoint;

use std::iter::Fuse;

pub use smoothing_window::SmoothingWindow;
pub use tracepoint::{Temporal, TracePoint};

/// Consumes values from a trace, and outputs a trace after processing.
pub trait Window: Clone {
    type TimeType: Temporal;
    type InputType: Copy;
    type OutputType;

    /// Pushes a value into the window, returns `true` if an output is ready.
    fn push(&mut self, value: Self::InputType) -> bool;

    /// Extracts the window's current processed value.
    fn output(&self) -> Option<Self::OutputType>;

    /// Maps the time of the latest input onto the time of the current output.
    fn apply_time_shift(&self, time: Self::TimeType) -> Self::TimeType;

    /// Called repeatedly once the source is exhausted, to release outputs still
    /// held back by the window. `last_time` is the time of the final input.
    fn flush(
        &mut self,
        _last_time: Self::TimeType,
    ) -> Option<(Self::TimeType, Self::OutputType)> {
        None
    }
}

#[derive(Clone)]
pub struct WindowIter<I, W>
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window,
{
    window_function: W,
    source: Fuse<I>,
    last_time: Option<W::TimeType>,
}

impl<I, W> WindowIter<I, W>
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window,
{
    pub fn new(source: I, window_function: W) -> Self {
        WindowIter {
            source: source.fuse(),
            window_function,
            last_time: None,
        }
    }
}

impl<I, W> Iterator for WindowIter<I, W>
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window<
            TimeType = <I::Item as TracePoint>::Time,
            InputType = <I::Item as TracePoint>::Value,
        >,
{
    type Item = (W::TimeType, W::OutputType);

    fn next(&mut self) -> Option<Self::Item> {
        for val in self.source.by_ref() {
            self.last_time = Some(val.get_time());
            if self.window_function.push(val.clone_value()) {
                return Some((
                    self.window_function.apply_time_shift(val.get_time()),
                    self.window_function.output()?,
                ));
            }
        }
        self.window_function.flush(self.last_time?)
    }
}

pub trait WindowFilter<I, W>
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window,
{
    fn window(self, window: W) -> WindowIter<I, W>;
}

impl<I, W> WindowFilter<I, W> for I
where
    I: Iterator,
    I::Item: TracePoint,
    W: Window,
{
    fn window(self, window: W) -> WindowIter<I, W> {
        WindowIter::<I, W>::new(self, window)
    }
}
