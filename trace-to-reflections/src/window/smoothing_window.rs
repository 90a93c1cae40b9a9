use super::Window;
use rfscan_common::{Real, SampleIndex};
use std::collections::VecDeque;

/// Centred moving average over `[i - half_width, i + half_width]`.
/// Near either end of the trace the average is taken over the samples
/// available, so every input produces exactly one output.
#[derive(Default, Clone)]
pub struct SmoothingWindow {
    half_width: usize,
    window: VecDeque<Real>,
    sum: Real,
    /// Index of the sample at the front of `window`.
    front: SampleIndex,
    num_pushed: usize,
    /// Also the index of the next output.
    num_emitted: usize,
}

impl SmoothingWindow {
    pub fn new(half_width: usize) -> Self {
        SmoothingWindow {
            half_width,
            window: VecDeque::with_capacity(2 * half_width + 1),
            ..Default::default()
        }
    }

    /// Drops samples too early to contribute to the average centred on `centre`.
    fn trim_to(&mut self, centre: SampleIndex) {
        while self.front + self.half_width < centre {
            let Some(old) = self.window.pop_front() else {
                break;
            };
            self.sum -= old;
            self.front += 1;
        }
    }

    fn mean(&self) -> Option<Real> {
        (!self.window.is_empty()).then(|| self.sum / self.window.len() as Real)
    }
}

impl Window for SmoothingWindow {
    type TimeType = SampleIndex;
    type InputType = Real;
    type OutputType = Real;

    fn push(&mut self, value: Real) -> bool {
        self.window.push_back(value);
        self.sum += value;
        self.num_pushed += 1;
        if self.num_pushed > self.half_width {
            self.trim_to(self.num_emitted);
            self.num_emitted += 1;
            true
        } else {
            false
        }
    }

    fn output(&self) -> Option<Real> {
        self.mean()
    }

    fn apply_time_shift(&self, time: SampleIndex) -> SampleIndex {
        time - self.half_width
    }

    fn flush(&mut self, last_time: SampleIndex) -> Option<(SampleIndex, Real)> {
        if self.num_emitted >= self.num_pushed {
            return None;
        }
        let centre = self.num_emitted;
        self.trim_to(centre);
        self.num_emitted += 1;
        let time = last_time - (self.num_pushed - 1 - centre);
        Some((time, self.mean()?))
    }
}
