use log::trace;
use nalgebra::DMatrix;

use crate::error::{try_zeroed, FiniteDiffError, Result};

/// Fills `weights` with finite difference weights for derivative orders `0..=max_deriv`
/// at `around`, using Fornberg's recurrence over the nodes in `grid`.
///
/// Storage is column-major: the weight of node `i` for derivative order `k` is written
/// to `weights[i + k * ld]`. `ld` must be at least `grid.len()`; padding entries between
/// columns are left untouched. Nodes need not be ordered but must be distinct.
///
/// # Errors
/// - [FiniteDiffError::TooSmallGrid] when `grid.len() < max_deriv + 1`,
/// - [FiniteDiffError::WrongLeadingDimension] when `ld < grid.len()`,
/// - [FiniteDiffError::BufferTooShort] when `weights` cannot hold `max_deriv + 1` columns.
///
/// # Example
/// ```
/// use finitediff::fill_weights;
///
/// let mut weights = [0.0; 8];
/// fill_weights(&mut weights, 4, &[-1.0, 0.0, 1.0], 1, 0.0).unwrap();
/// assert_eq!([-0.5, 0.0, 0.5], weights[4..7]);
/// ```
pub fn fill_weights(
    weights: &mut [f64],
    ld: usize,
    grid: &[f64],
    max_deriv: usize,
    around: f64,
) -> Result<()> {
    let size = grid.len();
    check_shape(weights.len(), ld, size, max_deriv)?;

    for k in 0..=max_deriv {
        weights[k * ld..k * ld + size].fill(0.0);
    }
    weights[0] = 1.0;

    let mut c1 = 1.0;
    let mut c4 = grid[0] - around;
    for i in 1..size {
        let mn = i.min(max_deriv);
        let mut c2 = 1.0;
        let c5 = c4;
        c4 = grid[i] - around;

        for j in 0..i {
            let c3 = grid[i] - grid[j];
            let c3_r = 1.0 / c3;
            c2 *= c3;

            if j == i - 1 {
                // weights of the new node, from those of its predecessor
                let c2_r = 1.0 / c2;
                for k in (1..=mn).rev() {
                    let lower = weights[i - 1 + (k - 1) * ld];
                    let same = weights[i - 1 + k * ld];
                    weights[i + k * ld] = c1 * (k as f64 * lower - c5 * same) * c2_r;
                }
                weights[i] = -c1 * c5 * weights[i - 1] * c2_r;
            }

            for k in (1..=mn).rev() {
                let same = weights[j + k * ld];
                let lower = weights[j + (k - 1) * ld];
                weights[j + k * ld] = (c4 * same - k as f64 * lower) * c3_r;
            }
            weights[j] = c4 * weights[j] * c3_r;
        }
        c1 = c2;
    }
    Ok(())
}

/// Finite difference weights as a `grid.len() x (max_deriv + 1)` matrix, one column per
/// derivative order. See [fill_weights].
///
/// # Example
/// ```
/// use finitediff::weights;
/// use assert_approx_eq::assert_approx_eq;
///
/// let w = weights(&[-2.0, -1.0, 0.0, 1.0, 2.0], 2, 0.0).unwrap();
/// assert_approx_eq!(-2.5, w[(2, 2)], 1e-14);
/// assert_approx_eq!(2.0 / 3.0, w[(3, 1)], 1e-14);
/// ```
pub fn weights(grid: &[f64], max_deriv: usize, around: f64) -> Result<DMatrix<f64>> {
    let mut matrix = DMatrix::<f64>::zeros(grid.len(), max_deriv + 1);
    fill_weights(matrix.as_mut_slice(), grid.len(), grid, max_deriv, around)?;
    Ok(matrix)
}

/// Like [weights], but `max_deriv` defaults to `(grid.len() + 1) / 2`.
pub fn generate_weights(grid: &[f64], max_deriv: Option<usize>, around: f64) -> Result<DMatrix<f64>> {
    let max_deriv = max_deriv.unwrap_or((grid.len() + 1) / 2);
    weights(grid, max_deriv, around)
}

/// Same result as [fill_weights], computed with the nodes visited in order of increasing
/// distance from `around`.
///
/// Starting the recurrence from the nodes nearest to the evaluation point limits
/// cancellation on unevenly spaced grids. Rows are written back in the caller's node
/// order, so the output is interchangeable with that of [fill_weights].
pub fn fill_weights_reordered(
    weights: &mut [f64],
    ld: usize,
    grid: &[f64],
    max_deriv: usize,
    around: f64,
) -> Result<()> {
    let size = grid.len();
    check_shape(weights.len(), ld, size, max_deriv)?;

    // sorted position -> original position
    let mut order: Vec<usize> = (0..size).collect();
    order.sort_by(|a, b| {
        let da = (grid[*a] - around).abs();
        let db = (grid[*b] - around).abs();
        da.total_cmp(&db)
    });
    trace!("reordered grid of {} nodes around {}: {:?}", size, around, order);

    let sorted_grid: Vec<f64> = order.iter().map(|idx| grid[*idx]).collect();
    let mut sorted_weights = try_zeroed(size * (max_deriv + 1))?;
    fill_weights(&mut sorted_weights, size, &sorted_grid, max_deriv, around)?;

    for k in 0..=max_deriv {
        let column = &mut weights[k * ld..k * ld + size];
        column.fill(0.0);
        for (position, original) in order.iter().enumerate() {
            column[*original] += sorted_weights[position + k * size];
        }
    }
    Ok(())
}

/// Matrix form of [fill_weights_reordered].
///
/// # Example
/// ```
/// use finitediff::{weights, weights_reordered};
/// use assert_approx_eq::assert_approx_eq;
///
/// let grid = [-6.0, -3.0, 0.0, 3.0, 6.0];
/// let naive = weights(&grid, 2, 0.0).unwrap();
/// let optim = weights_reordered(&grid, 2, 0.0).unwrap();
/// for (a, b) in naive.iter().zip(optim.iter()) {
///     assert_approx_eq!(*a, *b, 1e-15);
/// }
/// ```
pub fn weights_reordered(grid: &[f64], max_deriv: usize, around: f64) -> Result<DMatrix<f64>> {
    let mut matrix = DMatrix::<f64>::zeros(grid.len(), max_deriv + 1);
    fill_weights_reordered(matrix.as_mut_slice(), grid.len(), grid, max_deriv, around)?;
    Ok(matrix)
}

fn check_shape(buffer_len: usize, ld: usize, size: usize, max_deriv: usize) -> Result<()> {
    if size < max_deriv + 1 {
        return Err(FiniteDiffError::TooSmallGrid { required: max_deriv + 1, actual: size });
    }
    if ld < size {
        return Err(FiniteDiffError::WrongLeadingDimension { name: "weights", required: size, actual: ld });
    }
    let required = max_deriv * ld + size;
    if buffer_len < required {
        return Err(FiniteDiffError::BufferTooShort { name: "weights", required, actual: buffer_len });
    }
    Ok(())
}
