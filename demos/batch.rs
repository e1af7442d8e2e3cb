extern crate finitediff;

use finitediff::{first_monotonicity_violation, interpolate, DriverConfig, Window};

fn main() {

    let n_data = 50;
    let n_fit = 537;
    let x_max = 2.0 * std::f64::consts::PI;

    let x_data: Vec<f64> = (0..n_data).map(|i| x_max * i as f64 / (n_data - 1) as f64).collect();
    let y_data = vec![x_data.iter().map(|x| x.sin()).collect::<Vec<f64>>()];
    assert!(first_monotonicity_violation(&x_data).is_none());

    let x_fit: Vec<f64> = (0..n_fit).map(|i| x_max * i as f64 / (n_fit - 1) as f64).collect();

    let config = DriverConfig::from_env().unwrap();
    let result = interpolate(&x_data, &y_data, &x_fit, Window::new(5, 5), 1, &config).unwrap();

    println!("x;y;dydx;error");
    for (x, estimate) in x_fit.iter().zip(result.iter()) {
        println!("{:.4};{:.6};{:.6};{:.2e}", x, estimate[(0, 0)], estimate[(0, 1)], estimate[(0, 0)] - x.sin());
    }
}
