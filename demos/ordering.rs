extern crate finitediff;

use finitediff::{weights, weights_reordered};

fn main() {

    let max_deriv = 2;
    let labels = ["interpolation", "1st derivative", "2nd derivative"];
    let grid = vec![-6.0, -3.0, 0.0, 3.0, 6.0];

    let naive = weights(&grid, max_deriv, 0.0).unwrap();
    let optim = weights_reordered(&grid, max_deriv, 0.0).unwrap();

    for order in 0..=max_deriv {
        let differences: Vec<String> = naive.column(order).iter()
            .zip(optim.column(order).iter())
            .map(|(a, b)| format!("{:e}", a - b))
            .collect();
        println!("{}: {}", labels[order], differences.join(" "));
    }
}
