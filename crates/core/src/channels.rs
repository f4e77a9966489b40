//! Channel range selection.

use std::ops::Range;

use crate::notify::{ListenerId, Notifier};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("channel range {lo}..{hi} is inverted")]
pub struct InvertedRange {
    pub lo: usize,
    pub hi: usize,
}

/// A half-open range of channel indices over `0..num_channels`.
#[derive(Debug)]
pub struct ChannelSelector {
    num_channels: usize,
    range: Range<usize>,
    notifier: Notifier<Range<usize>>,
}

impl ChannelSelector {
    /// Starts with every channel selected.
    pub fn new(num_channels: usize) -> Self {
        Self {
            num_channels,
            range: 0..num_channels,
            notifier: Notifier::new(),
        }
    }

    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn subscribe(&self, listener: impl Fn(&Range<usize>) + 'static) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    /// Select `lo..hi`, clamping both ends to the channel count.
    pub fn set_range(&mut self, lo: usize, hi: usize) -> Result<Range<usize>, InvertedRange> {
        if lo > hi {
            log::debug!("rejecting channel range {lo}..{hi}");
            return Err(InvertedRange { lo, hi });
        }

        self.range = lo.min(self.num_channels)..hi.min(self.num_channels);
        self.notifier.publish(&self.range);
        Ok(self.range.clone())
    }

    pub fn select_all(&mut self) -> Range<usize> {
        self.range = 0..self.num_channels;
        self.notifier.publish(&self.range);
        self.range.clone()
    }
}
