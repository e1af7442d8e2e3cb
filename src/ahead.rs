use std::ops::Range;

use crate::apply::{check_buffer, derivatives_at_point};
use crate::error::{FiniteDiffError, Result};
use crate::validate::first_monotonicity_violation;

/// Side from which [interpolate_ahead] predicts each sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From the `n` preceding samples.
    Forward,
    /// From the `n` following samples.
    Backward,
    /// Mean of both predictions where both exist, otherwise the one available.
    Both,
}

/// Predicts each `y[i]` by extrapolating the polynomial through `n` neighbouring samples
/// on the side given by `direction`, without using `y[i]` itself.
///
/// Returns the predictions together with the range of indices of `x` they belong to:
/// `n..len` going forward, `0..len - n` going backward and `0..len` for both.
/// Comparing the predictions against `y` gives a cheap estimate of the local smoothness
/// of the data.
///
/// # Errors
/// [FiniteDiffError::NotMonotonic] when `x` is not strictly increasing,
/// [FiniteDiffError::TooFewPoints] when `n == 0`, [FiniteDiffError::TooSmallGrid] when
/// `x` holds `n` or fewer values, [FiniteDiffError::BufferTooShort] when `y` is shorter
/// than `x`.
///
/// # Example
/// ```
/// use finitediff::{interpolate_ahead, Direction};
/// use assert_approx_eq::assert_approx_eq;
///
/// let x = [0.0, 1.0, 2.0, 3.0, 4.0];
/// let y = [0.0, 1.0, 4.0, 9.0, 16.0];
/// let (predicted, range) = interpolate_ahead(&x, &y, 3, Direction::Forward).unwrap();
///
/// assert_eq!(3..5, range);
/// assert_approx_eq!(9.0, predicted[0], 1e-12);
/// assert_approx_eq!(16.0, predicted[1], 1e-12);
/// ```
pub fn interpolate_ahead(x: &[f64], y: &[f64], n: usize, direction: Direction) -> Result<(Vec<f64>, Range<usize>)> {
    if let Some(index) = first_monotonicity_violation(x) {
        return Err(FiniteDiffError::NotMonotonic { index });
    }
    if n == 0 {
        return Err(FiniteDiffError::TooFewPoints { required: 1, actual: 0 });
    }
    let size = x.len();
    if size <= n {
        return Err(FiniteDiffError::TooSmallGrid { required: n + 1, actual: size });
    }
    check_buffer("y", y.len(), size)?;

    match direction {
        Direction::Forward => {
            let predicted = (n..size)
                .map(|i| predict(&x[i - n..i], &y[i - n..i], x[i]))
                .collect::<Result<Vec<f64>>>()?;
            Ok((predicted, n..size))
        }
        Direction::Backward => {
            let predicted = (0..size - n)
                .map(|i| predict(&x[i + 1..i + 1 + n], &y[i + 1..i + 1 + n], x[i]))
                .collect::<Result<Vec<f64>>>()?;
            Ok((predicted, 0..size - n))
        }
        Direction::Both => {
            let (forward, _) = interpolate_ahead(x, y, n, Direction::Forward)?;
            let (backward, _) = interpolate_ahead(x, y, n, Direction::Backward)?;

            let mut combined = vec![0.0; size];
            for (i, value) in forward.iter().enumerate() {
                combined[n + i] += value;
            }
            for (i, value) in backward.iter().enumerate() {
                combined[i] += value;
            }
            for value in combined.iter_mut().take(size - n).skip(n) {
                *value /= 2.0;
            }
            Ok((combined, 0..size))
        }
    }
}

fn predict(nodes: &[f64], values: &[f64], at: f64) -> Result<f64> {
    Ok(derivatives_at_point(nodes, values, at, 0)?[0])
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn cubic(x: f64) -> f64 {
        1.0 - x + 0.5 * x * x - 0.1 * x * x * x
    }

    #[test]
    fn forward_is_exact_for_low_degree() {
        let x: Vec<f64> = (0..8).map(|i| 0.3 * i as f64 + 0.01 * (i * i) as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| cubic(*v)).collect();
        let (predicted, range) = interpolate_ahead(&x, &y, 4, Direction::Forward).unwrap();

        assert_eq!(4..8, range);
        assert_eq!(4, predicted.len());
        for (value, i) in predicted.iter().zip(range) {
            assert_approx_eq!(y[i], *value, 1e-12);
        }
    }

    #[test]
    fn backward_is_exact_for_low_degree() {
        let x: Vec<f64> = (0..7).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|v| cubic(*v)).collect();
        let (predicted, range) = interpolate_ahead(&x, &y, 4, Direction::Backward).unwrap();

        assert_eq!(0..3, range);
        for (value, i) in predicted.iter().zip(range) {
            assert_approx_eq!(y[i], *value, 1e-12);
        }
    }

    #[test]
    fn both_directions_average_the_overlap() {
        let x: Vec<f64> = (0..6).map(|i| i as f64).collect();
        // not a polynomial of degree < 2, so the two sides disagree
        let y: Vec<f64> = x.iter().map(|v| v.powi(3)).collect();
        let n = 2;

        let (forward, _) = interpolate_ahead(&x, &y, n, Direction::Forward).unwrap();
        let (backward, _) = interpolate_ahead(&x, &y, n, Direction::Backward).unwrap();
        let (both, range) = interpolate_ahead(&x, &y, n, Direction::Both).unwrap();

        assert_eq!(0..6, range);
        assert_approx_eq!(backward[0], both[0], 1e-12);
        assert_approx_eq!(backward[1], both[1], 1e-12);
        assert_approx_eq!((forward[0] + backward[2]) / 2.0, both[2], 1e-12);
        assert_approx_eq!((forward[1] + backward[3]) / 2.0, both[3], 1e-12);
        assert_approx_eq!(forward[2], both[4], 1e-12);
        assert_approx_eq!(forward[3], both[5], 1e-12);
    }

    #[test]
    fn linear_extrapolation_values() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [0.0, 1.0, 4.0, 9.0];
        let (predicted, _) = interpolate_ahead(&x, &y, 2, Direction::Forward).unwrap();
        // lines through (0,0),(1,1) and (1,1),(2,4)
        assert_approx_eq!(2.0, predicted[0], 1e-14);
        assert_approx_eq!(7.0, predicted[1], 1e-14);
    }

    #[test]
    fn rejects_invalid_input() {
        let x = [0.0, 1.0, 0.5, 2.0];
        let y = [0.0; 4];
        assert!(matches!(
            interpolate_ahead(&x, &y, 2, Direction::Forward),
            Err(FiniteDiffError::NotMonotonic { index: 2 })
        ));

        let x = [0.0, 1.0, 2.0];
        assert!(matches!(
            interpolate_ahead(&x, &y, 0, Direction::Both),
            Err(FiniteDiffError::TooFewPoints { .. })
        ));
        assert!(matches!(
            interpolate_ahead(&x, &y, 3, Direction::Forward),
            Err(FiniteDiffError::TooSmallGrid { required: 4, actual: 3 })
        ));
        assert!(matches!(
            interpolate_ahead(&x, &y[..2], 1, Direction::Backward),
            Err(FiniteDiffError::BufferTooShort { name: "y", .. })
        ));
    }
}
