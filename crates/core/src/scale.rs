//! Display gain controlled by the scale up/down buttons.

use crate::notify::{ListenerId, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("scale factor must be finite and greater than 1, got {0}")]
pub struct InvalidScaleFactor(pub f64);

#[derive(Debug)]
pub struct ScaleControl {
    gain: f64,
    factor: f64,
    notifier: Notifier<f64>,
}

impl ScaleControl {
    pub fn new(factor: f64) -> Result<Self, InvalidScaleFactor> {
        if !factor.is_finite() || factor <= 1.0 {
            return Err(InvalidScaleFactor(factor));
        }
        Ok(Self {
            gain: 1.0,
            factor,
            notifier: Notifier::new(),
        })
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn subscribe(&self, listener: impl Fn(&f64) + 'static) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    pub fn increase(&mut self) -> f64 {
        self.set_gain(self.gain * self.factor)
    }

    pub fn decrease(&mut self) -> f64 {
        self.set_gain(self.gain / self.factor)
    }

    pub fn reset(&mut self) -> f64 {
        self.set_gain(1.0)
    }

    fn set_gain(&mut self, gain: f64) -> f64 {
        self.gain = gain;
        self.notifier.publish(&gain);
        gain
    }
}
