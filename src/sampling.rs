use num::Float;

/// Sample points `from, from + step, from + 2 * step, ...` while below `to + step`.
///
/// Each point is the previous one plus `step`, so accumulated rounding can
/// push the last sample slightly past `to`; it is still produced. Iteration
/// ends early once adding `step` no longer changes the point, which happens
/// when `step` drops below half the float spacing at that magnitude.
pub struct Samples<F> {
    next: F,
    step: F,
    end: F,
}

impl<F: Float> Samples<F> {
    pub fn new(from: F, to: F, step: F) -> Self {
        Samples {
            next: from,
            step,
            end: to + step,
        }
    }
}

impl<F: Float> Iterator for Samples<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        // Also stops on NaN bounds or a non-positive step that would never reach the end
        if !(self.next < self.end) || !(self.step > F::zero()) {
            return None;
        }

        let x = self.next;
        self.next = x + self.step;

        if !(self.next > x) {
            self.next = self.end;
        }

        Some(x)
    }
}

#[test]
fn test_samples_include_end() {
    let xs: Vec<f64> = Samples::new(0., 1., 0.25).collect();

    assert_eq!(xs, vec![0., 0.25, 0.5, 0.75, 1.]);
}

#[test]
fn test_samples_accumulated_step() {
    let xs: Vec<f64> = Samples::new(-1., 1., 0.02).collect();

    // 0.02 is not exact in binary; the endpoint sample still shows up
    assert_eq!(xs.len(), 101);
    assert!((xs[100] - 1.).abs() < 1e-9);
}

#[test]
fn test_samples_degenerate() {
    assert_eq!(Samples::new(0., 0., 0.1).count(), 1);
    assert_eq!(Samples::new(1., 0., 0.1).count(), 0);
    assert_eq!(Samples::new(0., 1., 0.).count(), 0);
    assert_eq!(Samples::new(f64::NAN, 1., 0.1).count(), 0);
}

#[test]
fn test_samples_stop_when_step_is_absorbed() {
    // The spacing of f32 around 6e5 is 0.0625, so adding 0.02 is a no-op
    assert_eq!(Samples::new(600_000f32, 600_002., 0.02).count(), 1);
    assert_eq!(Samples::new(1e15f64, 1e15 + 2., 0.02).count(), 1);

    // Coarse but still advancing: every point is produced exactly once
    let xs: Vec<f32> = Samples::new(300_000f32, 300_001., 0.02).collect();

    assert!(xs.windows(2).all(|w| w[1] > w[0]));
    assert!(xs.len() <= 51);
}
