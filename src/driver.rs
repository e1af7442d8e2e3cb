use std::mem::size_of;

use log::{debug, trace};
use nalgebra::DMatrix;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::apply::{check_buffer, contract};
use crate::config::DriverConfig;
use crate::error::{try_zeroed, FiniteDiffError, Result};
use crate::interval::locate_from_guess;
use crate::weights::fill_weights;

/// Number of `f64` values filling one 64 byte cache line.
const CACHE_LINE: usize = 64 / size_of::<f64>();

/// Stencil placed around each target: `tail` nodes at or below it and `head` nodes above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub tail: usize,
    pub head: usize,
}

impl Window {
    pub fn new(tail: usize, head: usize) -> Self {
        Window { tail, head }
    }

    pub fn width(&self) -> usize {
        self.tail + self.head
    }

    /// First grid index of the window for a target in bracketing interval `interval`
    /// (as returned by [crate::locate]).
    ///
    /// The window is shifted to stay inside the grid, so near the boundaries the target
    /// is no longer centred in it. A grid narrower than the window gives `0`.
    ///
    /// # Example
    /// ```
    /// use finitediff::Window;
    ///
    /// let window = Window::new(2, 2);
    /// assert_eq!(4, window.offset(5, 10));
    /// assert_eq!(0, window.offset(-1, 10));
    /// assert_eq!(6, window.offset(9, 10));
    /// ```
    pub fn offset(&self, interval: isize, grid_len: usize) -> usize {
        let ideal = interval + 1 - self.tail as isize;
        let last_start = grid_len.saturating_sub(self.width()) as isize;
        let offset = ideal.clamp(0, last_start);
        if offset != ideal {
            trace!("window moved from {} to {} to fit a grid of {} nodes", ideal, offset, grid_len);
        }
        offset as usize
    }
}

/// Sample sets co-indexed with the grid, set `s` starting at `values[s * ld]`.
#[derive(Debug, Clone, Copy)]
pub struct SampleSets<'a> {
    values: &'a [f64],
    set_count: usize,
    ld: usize,
}

impl<'a> SampleSets<'a> {
    pub fn new(values: &'a [f64], set_count: usize, ld: usize) -> Self {
        SampleSets { values, set_count, ld }
    }

    /// A single set.
    pub fn single(values: &'a [f64]) -> Self {
        SampleSets { values, set_count: 1, ld: values.len() }
    }

    pub fn set_count(&self) -> usize {
        self.set_count
    }
}

/// Element strides of the output: `out[t * target_stride + s * set_stride + k]` holds
/// derivative order `k` of set `s` at target `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLayout {
    pub target_stride: usize,
    pub set_stride: usize,
}

impl OutputLayout {
    /// Layout without padding.
    pub fn packed(set_count: usize, max_deriv: usize) -> Self {
        OutputLayout {
            target_stride: set_count * (max_deriv + 1),
            set_stride: max_deriv + 1,
        }
    }
}

/// Read-only inputs shared by all workers of one batch.
#[derive(Clone, Copy)]
struct BatchContext<'a> {
    grid: &'a [f64],
    samples: SampleSets<'a>,
    window: Window,
    max_deriv: usize,
    layout: OutputLayout,
    ld_weights: usize,
}

/// Estimates values and derivatives up to `max_deriv` at every target from samples on
/// `grid`, each target using only the `window` of grid nodes surrounding it.
///
/// `grid` must be strictly increasing. Targets are split into contiguous blocks, one per
/// worker of `config`. Each worker owns one scratch weight matrix, reused across its block,
/// and seeds the interval search of every target with the result for the previous one.
///
/// All scratch space is reserved before anything is written, so on error `out` is left
/// unmodified.
///
/// # Errors
/// - [FiniteDiffError::TooSmallGrid] when `grid` holds fewer than `max_deriv + 1` nodes or
///   fewer nodes than the window,
/// - [FiniteDiffError::TooFewPoints] when the window is narrower than `max_deriv + 1`,
/// - [FiniteDiffError::WrongLeadingDimension] / [FiniteDiffError::BufferTooShort] for
///   inconsistent strides or buffer lengths,
/// - [FiniteDiffError::AllocationFailed] when scratch space cannot be reserved,
/// - [FiniteDiffError::ThreadPool] when the worker threads cannot be started.
///
/// # Example
/// ```
/// use finitediff::{interpolate_batch, DriverConfig, OutputLayout, SampleSets, Window};
/// use assert_approx_eq::assert_approx_eq;
///
/// let grid: Vec<f64> = (0..20).map(|i| i as f64 * 0.25).collect();
/// let values: Vec<f64> = grid.iter().map(|x| x * x).collect();
/// let targets = [0.1, 2.3, 4.6];
/// let mut out = vec![0.0; targets.len() * 2];
///
/// interpolate_batch(
///     &mut out,
///     OutputLayout::packed(1, 1),
///     &grid,
///     SampleSets::single(&values),
///     &targets,
///     Window::new(2, 2),
///     1,
///     &DriverConfig::sequential(),
/// ).unwrap();
///
/// assert_approx_eq!(2.3 * 2.3, out[2], 1e-12);
/// assert_approx_eq!(2.0 * 2.3, out[3], 1e-12);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn interpolate_batch(
    out: &mut [f64],
    layout: OutputLayout,
    grid: &[f64],
    samples: SampleSets,
    targets: &[f64],
    window: Window,
    max_deriv: usize,
    config: &DriverConfig,
) -> Result<()> {
    let orders = max_deriv + 1;
    let width = window.width();
    let set_count = samples.set_count;

    if grid.len() < orders {
        return Err(FiniteDiffError::TooSmallGrid { required: orders, actual: grid.len() });
    }
    if width < orders {
        return Err(FiniteDiffError::TooFewPoints { required: orders, actual: width });
    }
    if grid.len() < width {
        return Err(FiniteDiffError::TooSmallGrid { required: width, actual: grid.len() });
    }
    if samples.ld < grid.len() {
        return Err(FiniteDiffError::WrongLeadingDimension {
            name: "ydata",
            required: grid.len(),
            actual: samples.ld,
        });
    }
    if set_count == 0 || targets.is_empty() {
        return Ok(());
    }
    check_buffer("ydata", samples.values.len(), (set_count - 1) * samples.ld + grid.len())?;
    if layout.set_stride < orders {
        return Err(FiniteDiffError::WrongLeadingDimension {
            name: "out",
            required: orders,
            actual: layout.set_stride,
        });
    }
    let per_target = (set_count - 1) * layout.set_stride + orders;
    if layout.target_stride < per_target {
        return Err(FiniteDiffError::WrongLeadingDimension {
            name: "out",
            required: per_target,
            actual: layout.target_stride,
        });
    }
    check_buffer("out", out.len(), (targets.len() - 1) * layout.target_stride + per_target)?;

    let workers = config.workers().min(targets.len());
    let block = targets.len().div_ceil(workers);
    let blocks = targets.len().div_ceil(block);
    let ld_weights = width.div_ceil(CACHE_LINE) * CACHE_LINE;
    debug!(
        "interpolating {} targets x {} sets up to order {} with {} nodes per window on {} workers (stride {})",
        targets.len(),
        set_count,
        max_deriv,
        width,
        blocks,
        ld_weights
    );

    let mut scratch: Vec<Vec<f64>> = Vec::new();
    scratch
        .try_reserve_exact(blocks)
        .map_err(|_| FiniteDiffError::AllocationFailed { elements: blocks })?;
    for _ in 0..blocks {
        scratch.push(try_zeroed(ld_weights * orders)?);
    }

    let context = BatchContext { grid, samples, window, max_deriv, layout, ld_weights };

    if blocks == 1 {
        return interpolate_block(&context, out, targets, &mut scratch[0]);
    }

    let pool = ThreadPoolBuilder::new().num_threads(blocks).build()?;
    pool.install(|| {
        out.par_chunks_mut(block * layout.target_stride)
            .zip(targets.par_chunks(block))
            .zip(scratch.par_iter_mut())
            .try_for_each(|((out_block, target_block), weights)| {
                interpolate_block(&context, out_block, target_block, weights)
            })
    })
}

/// Owned-result form of [interpolate_batch]: one `sample_sets.len() x (max_deriv + 1)`
/// matrix per target, row `s` holding the estimates for set `s`.
///
/// # Example
/// ```
/// use finitediff::{interpolate, DriverConfig, Window};
/// use assert_approx_eq::assert_approx_eq;
///
/// let grid = [0.0, 1.0, 2.0];
/// let sets = vec![vec![2.0, 3.0, 5.0]];
/// let result = interpolate(&grid, &sets, &[0.5, 1.5], Window::new(2, 1), 2, &DriverConfig::default()).unwrap();
///
/// assert_eq!(2, result.len());
/// assert_approx_eq!(1.0, result[0][(0, 1)], 1e-14);
/// assert_approx_eq!(1.0, result[0][(0, 2)], 1e-14);
/// ```
pub fn interpolate(
    grid: &[f64],
    sample_sets: &[Vec<f64>],
    targets: &[f64],
    window: Window,
    max_deriv: usize,
    config: &DriverConfig,
) -> Result<Vec<DMatrix<f64>>> {
    let ld = grid.len();
    let set_count = sample_sets.len();
    let mut ydata = try_zeroed(set_count * ld)?;
    for (row, set) in ydata.chunks_exact_mut(ld.max(1)).zip(sample_sets) {
        check_buffer("sample set", set.len(), ld)?;
        row.copy_from_slice(&set[..ld]);
    }

    let layout = OutputLayout::packed(set_count, max_deriv);
    let mut out = try_zeroed(targets.len() * layout.target_stride)?;
    interpolate_batch(
        &mut out,
        layout,
        grid,
        SampleSets::new(&ydata, set_count, ld),
        targets,
        window,
        max_deriv,
        config,
    )?;

    let results = (0..targets.len())
        .map(|t| {
            let start = t * layout.target_stride;
            DMatrix::from_row_slice(set_count, max_deriv + 1, &out[start..start + layout.target_stride])
        })
        .collect();
    Ok(results)
}

fn interpolate_block(
    context: &BatchContext,
    out: &mut [f64],
    targets: &[f64],
    weights: &mut [f64],
) -> Result<()> {
    let width = context.window.width();
    let samples = context.samples;
    let mut interval = 0;

    for (t, target) in targets.iter().enumerate() {
        interval = locate_from_guess(context.grid, *target, interval);
        let offset = context.window.offset(interval, context.grid.len());

        fill_weights(
            weights,
            context.ld_weights,
            &context.grid[offset..offset + width],
            context.max_deriv,
            *target,
        )?;
        contract(
            &mut out[t * context.layout.target_stride..],
            context.layout.set_stride,
            weights,
            context.ld_weights,
            samples.set_count,
            context.max_deriv + 1,
            width,
            &samples.values[offset..],
            samples.ld,
        );
    }
    Ok(())
}
