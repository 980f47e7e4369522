/// Causal simple moving average over `window` samples.
///
/// Sequences shorter than the window come back unchanged. Otherwise the first
/// `window - 1` outputs average however many samples exist so far, and every
/// later output averages exactly the last `window` inputs. Each output depends
/// only on current and earlier inputs, so re-running over a grown buffer
/// reproduces the earlier outputs bit for bit.
pub fn smooth(data: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || data.len() < window {
        return data.to_vec();
    }
    let mut smoothed = Vec::with_capacity(data.len());
    let mut running_sum = 0.0;
    for (i, &value) in data.iter().enumerate() {
        running_sum += value;
        if i >= window {
            running_sum -= data[i - window];
            smoothed.push(running_sum / window as f64);
        } else {
            smoothed.push(running_sum / (i + 1) as f64);
        }
    }
    smoothed
}
#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    fn random_series(rng: &mut impl Rng, len: usize) -> Vec<f64> {
        (0..len).map(|_| rng.gen_range(0.0..200.0)).collect()
    }
    #[test]
    fn short_sequences_pass_through() {
        assert_eq!(smooth(&[], 5), Vec::<f64>::new());
        assert_eq!(smooth(&[1.0, 9.0, 4.0], 5), vec![1.0, 9.0, 4.0]);
        assert_eq!(smooth(&[1.0, 9.0, 4.0, 2.0], 5), vec![1.0, 9.0, 4.0, 2.0]);
    }
    #[test]
    fn ramps_up_then_uses_full_window() {
        let out = smooth(&[2.0, 4.0, 6.0, 8.0, 10.0], 3);
        assert_eq!(out, vec![2.0, 3.0, 4.0, 6.0, 8.0]);
    }
    #[test]
    fn window_of_two_over_three_readings() {
        assert_eq!(smooth(&[3.5, 4.0, 4.5], 2), vec![3.5, 3.75, 4.25]);
    }
    #[test]
    fn constant_input_stays_constant() {
        let out = smooth(&[7.0; 20], 5);
        assert!(out.iter().all(|&v| (v - 7.0).abs() < 1e-12));
    }
    #[test]
    fn output_length_matches_input() {
        let mut rng = rand::thread_rng();
        for window in 1..8 {
            for len in window..window + 40 {
                let data = random_series(&mut rng, len);
                assert_eq!(smooth(&data, window).len(), len);
            }
        }
    }
    #[test]
    fn shorter_than_window_is_identity() {
        let mut rng = rand::thread_rng();
        for window in 1..10 {
            for len in 0..window {
                let data = random_series(&mut rng, len);
                assert_eq!(smooth(&data, window), data);
            }
        }
    }
    #[test]
    fn prefixes_are_stable_as_buffer_grows() {
        let mut rng = rand::thread_rng();
        for window in 1..8 {
            let data = random_series(&mut rng, 60);
            let full = smooth(&data, window);
            for k in window..=data.len() {
                assert_eq!(&full[..k], smooth(&data[..k], window).as_slice());
            }
        }
    }
    #[test]
    fn outputs_never_look_ahead() {
        let base = vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0];
        let mut changed = base.clone();
        changed[5] = 1000.0;
        let a = smooth(&base, 3);
        let b = smooth(&changed, 3);
        assert_eq!(a[..5], b[..5]);
        assert_ne!(a[5], b[5]);
    }
}
