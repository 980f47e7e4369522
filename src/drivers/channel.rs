use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use crate::types::SamplerEvent;
/// Producer half, owned by the sampler thread.
#[derive(Clone)]
pub struct SampleSender {
    tx: Sender<SamplerEvent>,
}
impl SampleSender {
    /// Returns `false` once the consumer is gone.
    pub fn send_sample(&self, value: f64) -> bool {
        self.tx.send(SamplerEvent::Sample(value)).is_ok()
    }
    pub fn send_stopped(&self, reason: impl Into<String>) {
        self.tx.send(SamplerEvent::Stopped(reason.into())).ok();
    }
}
/// Everything that was waiting in the channel at drain time.
#[derive(Debug, Default, PartialEq)]
pub struct Drained {
    pub samples: Vec<f64>,
    pub stopped: Option<String>,
}
/// Consumer half, owned by the render tick.
pub struct SampleReceiver {
    rx: Receiver<SamplerEvent>,
}
impl SampleReceiver {
    /// Take every event currently queued without ever blocking.
    pub fn drain(&self) -> Drained {
        let mut drained = Drained::default();
        loop {
            match self.rx.try_recv() {
                Ok(SamplerEvent::Sample(value)) => drained.samples.push(value),
                Ok(SamplerEvent::Stopped(reason)) => drained.stopped = Some(reason),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if drained.stopped.is_none() {
                        drained.stopped = Some("sampler thread exited".to_owned());
                    }
                    break;
                }
            }
        }
        drained
    }
}
/// Unbounded hand-off between the sampler thread and the render tick.
pub fn sample_channel() -> (SampleSender, SampleReceiver) {
    let (tx, rx) = channel();
    (SampleSender { tx }, SampleReceiver { rx })
}
