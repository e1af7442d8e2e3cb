use nalgebra::DVector;

use crate::error::{FiniteDiffError, Result};
use crate::weights::weights;

/// Contracts precomputed weights against one or more sample sets.
///
/// For every set `s` and derivative order `k`:
/// `out[s * ld_out + k] = sum_i weights[i + k * ld_weights] * ydata[s * ld_ydata + i]`
/// with `i` running over `0..grid_len`.
///
/// # Errors
/// [FiniteDiffError::WrongLeadingDimension] when a leading dimension is smaller than
/// the logical row count, [FiniteDiffError::BufferTooShort] when a buffer cannot hold
/// the requested shape.
#[allow(clippy::too_many_arguments)]
pub fn apply_weights(
    out: &mut [f64],
    ld_out: usize,
    weights: &[f64],
    ld_weights: usize,
    set_count: usize,
    max_deriv: usize,
    grid_len: usize,
    ydata: &[f64],
    ld_ydata: usize,
) -> Result<()> {
    let orders = max_deriv + 1;
    check_leading_dimension("out", ld_out, orders)?;
    check_leading_dimension("weights", ld_weights, grid_len)?;
    check_leading_dimension("ydata", ld_ydata, grid_len)?;
    check_buffer("weights", weights.len(), max_deriv * ld_weights + grid_len)?;
    if set_count == 0 {
        return Ok(());
    }
    check_buffer("out", out.len(), (set_count - 1) * ld_out + orders)?;
    check_buffer("ydata", ydata.len(), (set_count - 1) * ld_ydata + grid_len)?;

    contract(out, ld_out, weights, ld_weights, set_count, orders, grid_len, ydata, ld_ydata);
    Ok(())
}

/// Unchecked kernel of [apply_weights], shared with the batch driver.
#[allow(clippy::too_many_arguments)]
pub(crate) fn contract(
    out: &mut [f64],
    ld_out: usize,
    weights: &[f64],
    ld_weights: usize,
    set_count: usize,
    orders: usize,
    grid_len: usize,
    ydata: &[f64],
    ld_ydata: usize,
) {
    for set in 0..set_count {
        let values = &ydata[set * ld_ydata..set * ld_ydata + grid_len];
        for k in 0..orders {
            let column = &weights[k * ld_weights..k * ld_weights + grid_len];
            out[set * ld_out + k] = column.iter().zip(values).map(|(w, y)| w * y).sum();
        }
    }
}

/// Value and derivatives up to `max_deriv` at `around` of the polynomial interpolating
/// `values` sampled on `grid`.
///
/// # Example
/// ```
/// use finitediff::derivatives_at_point;
/// use assert_approx_eq::assert_approx_eq;
///
/// // y = x^2
/// let d = derivatives_at_point(&[0.0, 0.5, 1.0], &[0.0, 0.25, 1.0], 0.5, 2).unwrap();
/// assert_approx_eq!(0.25, d[0], 1e-14);
/// assert_approx_eq!(1.0, d[1], 1e-14);
/// assert_approx_eq!(2.0, d[2], 1e-14);
/// ```
pub fn derivatives_at_point(
    grid: &[f64],
    values: &[f64],
    around: f64,
    max_deriv: usize,
) -> Result<DVector<f64>> {
    check_buffer("values", values.len(), grid.len())?;
    let w = weights(grid, max_deriv, around)?;
    let samples = DVector::from_column_slice(&values[..grid.len()]);
    Ok(w.tr_mul(&samples))
}

fn check_leading_dimension(name: &'static str, ld: usize, required: usize) -> Result<()> {
    if ld < required {
        return Err(FiniteDiffError::WrongLeadingDimension { name, required, actual: ld });
    }
    Ok(())
}

pub(crate) fn check_buffer(name: &'static str, actual: usize, required: usize) -> Result<()> {
    if actual < required {
        return Err(FiniteDiffError::BufferTooShort { name, required, actual });
    }
    Ok(())
}
