use std::path::PathBuf;
use log::{debug, info, warn};
use crate::config::MonitorConfig;
use crate::drivers::buffer::HistoryBuffers;
use crate::drivers::channel::SampleReceiver;
use crate::drivers::error::MonitorError;
use crate::drivers::smoothing::smooth;
use crate::types::{SamplerStatus, SessionState};
/// Destination for the one-shot full-session chart.
pub trait SummaryExporter {
    fn export(&mut self, smoothed: &[f64]) -> Result<PathBuf, MonitorError>;
}
/// Smoothed live window, ready to hand to the plot.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveFrame {
    pub points: Vec<[f64; 2]>,
    pub latest: Option<f64>,
    pub x_max: f64,
    pub y_max: f64,
    pub total_samples: usize,
    pub sampler: SamplerStatus,
}
impl LiveFrame {
    fn from_series(
        smoothed: &[f64],
        max_metric: f64,
        total_samples: usize,
        sampler: SamplerStatus,
    ) -> Self {
        let points = smoothed
            .iter()
            .enumerate()
            .map(|(i, v)| [i as f64, *v])
            .collect();
        Self {
            points,
            latest: smoothed.last().copied(),
            x_max: smoothed.len().max(1) as f64,
            // value axis stays fixed at the clamp ceiling; only x follows the window
            y_max: max_metric,
            total_samples,
            sampler,
        }
    }
}
/// Outcome of closing the session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
    pub path: PathBuf,
    pub samples: usize,
}
/// Consumer side of the pipeline: drains the channel on each tick, keeps both
/// history buffers and runs the finalizer exactly once on close.
pub struct LiveSession {
    receiver: SampleReceiver,
    buffers: HistoryBuffers,
    smooth_window: usize,
    max_metric: f64,
    state: SessionState,
    sampler: SamplerStatus,
}
impl LiveSession {
    pub fn new(receiver: SampleReceiver, config: &MonitorConfig) -> Self {
        Self {
            receiver,
            buffers: HistoryBuffers::new(config.history_len, config.max_metric),
            smooth_window: config.smooth_window,
            max_metric: config.max_metric,
            state: SessionState::Running,
            sampler: SamplerStatus::default(),
        }
    }
    pub fn state(&self) -> SessionState {
        self.state
    }
    pub fn sampler_status(&self) -> &SamplerStatus {
        &self.sampler
    }
    pub fn buffers(&self) -> &HistoryBuffers {
        &self.buffers
    }
    /// One render tick. Returns `None` once the session is closed.
    pub fn tick(&mut self) -> Option<LiveFrame> {
        if self.state == SessionState::Closed {
            return None;
        }
        self.ingest_pending();
        self.buffers.trim_window();
        let smoothed = smooth(self.buffers.window().as_slice(), self.smooth_window);
        Some(LiveFrame::from_series(
            &smoothed,
            self.max_metric,
            self.buffers.full_history().len(),
            self.sampler.clone(),
        ))
    }
    /// Running -> Closed. Exports the smoothed full history on the first call;
    /// later calls do nothing and return `Ok(None)`.
    pub fn close<E: SummaryExporter>(
        &mut self,
        exporter: &mut E,
    ) -> Result<Option<SessionSummary>, MonitorError> {
        if self.state == SessionState::Closed {
            return Ok(None);
        }
        self.state = SessionState::Closed;
        self.ingest_pending();
        let history = self.buffers.full_history();
        info!("session closed with {} samples, exporting summary", history.len());
        let smoothed = smooth(history, self.smooth_window);
        let path = exporter.export(&smoothed)?;
        Ok(Some(SessionSummary {
            path,
            samples: history.len(),
        }))
    }
    fn ingest_pending(&mut self) {
        let drained = self.receiver.drain();
        if !drained.samples.is_empty() {
            debug!("drained {} samples", drained.samples.len());
        }
        for value in drained.samples {
            self.buffers.record(value);
        }
        if let Some(reason) = drained.stopped {
            if !self.sampler.is_stopped() {
                warn!("sampler stopped ({reason}); no new samples will arrive");
                self.sampler = SamplerStatus::Stopped(reason);
            }
        }
    }
}
