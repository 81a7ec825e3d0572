use serde::{Deserialize, Serialize};

/// Upper bound on the number of sample points of a usable universe.
pub const MAX_POINTS: usize = 1 << 24;

/// An evenly spaced discretization of `[low, high)`, generated the way
/// `numpy.arange` does: `low, low + step, ..., ` up to but excluding `high`.
///
/// The declared `[low, high]` interval (bounds inclusive) is also the domain
/// accepted for crisp inputs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub low: f64,
    pub high: f64,
    pub step: f64,
}

impl Universe {
    pub fn new(low: f64, high: f64, step: f64) -> Self {
        Universe { low, high, step }
    }

    /// Number of sample points.
    pub fn len(&self) -> usize {
        if !self.is_valid_range() {
            return 0;
        }

        // Same rounding as numpy.arange: ceil((stop - start) / step)
        ((self.high - self.low) / self.step).ceil() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A universe is usable when it is finite, strictly increasing and has
    /// between two and [`MAX_POINTS`] sample points.
    pub fn is_valid(&self) -> bool {
        self.is_valid_range() && self.len() >= 2
    }

    fn is_valid_range(&self) -> bool {
        self.low.is_finite()
            && self.high.is_finite()
            && self.step.is_finite()
            && self.step > 0.
            && self.high > self.low
            && ((self.high - self.low) / self.step).ceil() <= MAX_POINTS as f64
    }

    /// Whether `x` lies within the declared bounds, both ends inclusive.
    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }

    pub fn points(&self) -> Arange {
        Arange {
            start: self.low,
            step: self.step,
            index: 0,
            len: self.len(),
        }
    }
}

pub struct Arange {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Iterator for Arange {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Arange {}
