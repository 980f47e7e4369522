use crate::drivers::parser::clamp_sample;
/// Most recent readings for the live view.
///
/// Pushes never evict; `trim` drops the oldest readings beyond `capacity`
/// once a whole batch has been appended.
#[derive(Clone, Debug)]
pub struct SlidingWindow {
    samples: Vec<f64>,
    capacity: usize,
}
impl SlidingWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
        }
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    pub fn push(&mut self, sample: f64) {
        self.samples.push(sample);
    }
    pub fn trim(&mut self) {
        if self.samples.len() > self.capacity {
            let excess = self.samples.len() - self.capacity;
            self.samples.drain(..excess);
        }
    }
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
/// The live window plus the never-trimmed session record, fed together.
#[derive(Clone, Debug)]
pub struct HistoryBuffers {
    window: SlidingWindow,
    full: Vec<f64>,
    max_metric: f64,
}
impl HistoryBuffers {
    pub fn new(history_len: usize, max_metric: f64) -> Self {
        Self {
            window: SlidingWindow::with_capacity(history_len),
            full: Vec::new(),
            max_metric,
        }
    }
    /// Clamp and append to both buffers. Returns the stored value.
    pub fn record(&mut self, raw: f64) -> f64 {
        let sample = clamp_sample(raw, self.max_metric);
        self.window.push(sample);
        self.full.push(sample);
        sample
    }
    pub fn trim_window(&mut self) {
        self.window.trim();
    }
    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }
    pub fn full_history(&self) -> &[f64] {
        &self.full
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn record_appends_clamped_value_to_both() {
        let mut buffers = HistoryBuffers::new(100, 200.0);
        assert_eq!(buffers.record(-3.0), 0.0);
        assert_eq!(buffers.record(512.0), 200.0);
        assert_eq!(buffers.record(42.0), 42.0);
        assert_eq!(buffers.window().as_slice(), &[0.0, 200.0, 42.0]);
        assert_eq!(buffers.full_history(), &[0.0, 200.0, 42.0]);
    }
    #[test]
    fn window_grows_past_capacity_until_trimmed() {
        let mut buffers = HistoryBuffers::new(3, 200.0);
        for v in 0..5 {
            buffers.record(v as f64);
        }
        assert_eq!(buffers.window().len(), 5);
        buffers.trim_window();
        assert_eq!(buffers.window().as_slice(), &[2.0, 3.0, 4.0]);
        assert_eq!(buffers.full_history().len(), 5);
    }
    #[test]
    fn trim_keeps_last_values_in_arrival_order() {
        let mut buffers = HistoryBuffers::new(100, 200.0);
        for v in 0..150 {
            buffers.record(v as f64);
        }
        buffers.trim_window();
        let expected: Vec<f64> = (50..150).map(|v| v as f64).collect();
        assert_eq!(buffers.window().as_slice(), expected.as_slice());
        assert_eq!(buffers.full_history().len(), 150);
        assert_eq!(buffers.full_history()[0], 0.0);
    }
    #[test]
    fn trim_under_capacity_is_noop() {
        let mut window = SlidingWindow::with_capacity(10);
        window.push(1.0);
        window.push(2.0);
        window.trim();
        assert_eq!(window.as_slice(), &[1.0, 2.0]);
        assert_eq!(window.capacity(), 10);
        assert!(!window.is_empty());
    }
}
