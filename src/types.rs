// src/types.rs
// Sampler thread -> render tick
#[derive(Clone, Debug, PartialEq)]
pub enum SamplerEvent {
    Sample(f64),
    // stdout closed; carries the exit status of the measurement tool
    Stopped(String),
}
// Live session lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Closed,
}
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SamplerStatus {
    #[default]
    Streaming,
    Stopped(String),
}
impl SamplerStatus {
    pub fn is_stopped(&self) -> bool {
        matches!(self, SamplerStatus::Stopped(_))
    }
}
