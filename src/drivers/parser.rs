/// Interpret one raw sampler line as a reading.
///
/// Blank lines, headers and anything else that is not a single finite number
/// yield `None`; the caller is expected to drop them without complaint.
pub fn parse_line(line: &str) -> Option<f64> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}
/// Clamp a reading into `[0, max_metric]`.
pub fn clamp_sample(raw: f64, max_metric: f64) -> f64 {
    raw.min(max_metric).max(0.0)
}
