extern crate finitediff;

use finitediff::weights;

fn main() {

    let grid = vec![-2.0, -1.0, 0.0, 1.0, 2.0];
    let max_deriv = 2;
    let labels = ["interpolation", "1st derivative", "2nd derivative"];

    let w = weights(&grid, max_deriv, 0.0).unwrap();

    for order in 0..=max_deriv {
        let column: Vec<String> = w.column(order).iter().map(|c| format!("{:.4}", c)).collect();
        println!("{}: {}", labels[order], column.join(" "));
    }
}
