use std::sync::mpsc;

/// One progress report from the conversion pipeline.
///
/// `current` is monotonically non-decreasing across a conversion and reaches
/// `total` exactly once, at completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressEvent {
    pub current: u32,
    pub total: u32,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(current: u32, total: u32, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }
}

/// Observer contract for conversion progress.
///
/// `report` runs synchronously on the converting thread and must return
/// promptly; anything slow belongs on the far side of a channel.
pub trait ProgressSink {
    fn report(&mut self, event: ProgressEvent);
}

/// Discards all progress events.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _event: ProgressEvent) {}
}

/// Adapter turning a closure into a [`ProgressSink`].
pub struct FnProgress<F>(F);

impl<F: FnMut(ProgressEvent)> FnProgress<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F: FnMut(ProgressEvent)> ProgressSink for FnProgress<F> {
    fn report(&mut self, event: ProgressEvent) {
        (self.0)(event);
    }
}

/// Sink that forwards events into a bounded channel.
///
/// Sending never blocks: if the receiver falls behind, events are dropped
/// rather than stalling the pipeline.
#[derive(Debug)]
pub struct ChannelProgress {
    tx: mpsc::SyncSender<ProgressEvent>,
}

impl ChannelProgress {
    /// Create a sink and its receiving end with the given channel capacity.
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (tx, rx) = mpsc::sync_channel(capacity);
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelProgress {
    fn report(&mut self, event: ProgressEvent) {
        let _ = self.tx.try_send(event);
    }
}
