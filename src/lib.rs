//! Finite difference weights on arbitrarily spaced one-dimensional grids and their use
//! for interpolating values and derivatives of tabulated functions.
//!
//! Weights are generated with Fornberg's recurrence (B. Fornberg, "Generation of Finite
//! Difference Formulas on Arbitrarily Spaced Grids", Math. Comp. 51 (1988) 699-706),
//! which yields every derivative order up to a maximum in O(n²) operations.
//! For many targets against one large grid, [interpolate_batch] locates each target with
//! a secant accelerated interval search ([locate]) and only works on a small window of
//! nodes around it, optionally on several threads.
//!
//! # Example
//! ```
//! use finitediff::{weights, interpolate, DriverConfig, Window};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let w = weights(&[-1.0, 0.0, 1.0], 2, 0.0).unwrap();
//! assert_approx_eq!(-2.0, w[(1, 2)], 1e-15);
//!
//! let grid: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
//! let sines = vec![grid.iter().map(|x| x.sin()).collect::<Vec<f64>>()];
//! let result = interpolate(&grid, &sines, &[1.234], Window::new(3, 3), 1, &DriverConfig::default()).unwrap();
//!
//! assert_approx_eq!(1.234_f64.sin(), result[0][(0, 0)], 1e-7);
//! assert_approx_eq!(1.234_f64.cos(), result[0][(0, 1)], 1e-5);
//! ```
//!
//! Input quality is not checked by the numerical routines; run [first_nan] and
//! [first_monotonicity_violation] on untrusted grids first.

mod ahead;
mod apply;
mod config;
mod driver;
mod error;
mod interval;
mod validate;
mod weights;

#[cfg(test)]
mod polynomial;

pub use ahead::{interpolate_ahead, Direction};
pub use apply::{apply_weights, derivatives_at_point};
pub use config::{DriverConfig, NUM_THREADS_ENV};
pub use driver::{interpolate, interpolate_batch, OutputLayout, SampleSets, Window};
pub use error::{FiniteDiffError, Result};
pub use interval::{locate, locate_from_guess};
pub use validate::{first_monotonicity_violation, first_nan};
pub use weights::{fill_weights, fill_weights_reordered, generate_weights, weights, weights_reordered};
