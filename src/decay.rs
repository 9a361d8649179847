use crate::error::{Error, Result};

/// A hyperparameter that changes over episodes, such as epsilon or alpha
pub trait Decay {
    /// Value at episode `t`
    fn evaluate(&self, t: f32) -> f32;
}

/// A plain number is a schedule that never changes
impl Decay for f32 {
    fn evaluate(&self, _t: f32) -> f32 {
        *self
    }
}

/// Where a schedule starts, where it settles, and how fast it gets there
///
/// A positive `rate` moves down from `start` to `end`, a negative one moves up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Span {
    start: f32,
    end: f32,
    rate: f32,
}

impl Span {
    fn new(rate: f32, start: f32, end: f32) -> Result<Self> {
        let falling = start > end;
        if start == end || (rate >= 0.0) != falling {
            return Err(Error::Decay(format!(
                "a rate of {rate} never takes the value from {start} to {end}"
            )));
        }
        Ok(Self { start, end, rate })
    }

    fn gap(&self) -> f32 {
        self.start - self.end
    }
}

/// v(t) = v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) * e<sup>-rt</sup>
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Exponential(Span);

impl Exponential {
    pub fn new(rate: f32, vi: f32, vf: f32) -> Result<Self> {
        Span::new(rate, vi, vf).map(Self)
    }
}

impl Decay for Exponential {
    fn evaluate(&self, t: f32) -> f32 {
        let span = &self.0;
        span.end + span.gap() * (-span.rate * t).exp()
    }
}

/// v(t) = v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) / (1 + rt)
///
/// The classic `1/t` learning-rate schedule of stochastic approximation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InverseTime(Span);

impl InverseTime {
    pub fn new(rate: f32, vi: f32, vf: f32) -> Result<Self> {
        Span::new(rate, vi, vf).map(Self)
    }
}

impl Decay for InverseTime {
    fn evaluate(&self, t: f32) -> f32 {
        let span = &self.0;
        span.end + span.gap() / (1.0 + span.rate * t)
    }
}

/// v(t) = v<sub>i</sub> - rt, held at v<sub>f</sub> once reached
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Linear(Span);

impl Linear {
    pub fn new(rate: f32, vi: f32, vf: f32) -> Result<Self> {
        Span::new(rate, vi, vf).map(Self)
    }
}

impl Decay for Linear {
    fn evaluate(&self, t: f32) -> f32 {
        let span = &self.0;
        let v = span.start - span.rate * t;
        if span.rate >= 0.0 {
            v.max(span.end)
        } else {
            v.min(span.end)
        }
    }
}
