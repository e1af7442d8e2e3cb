/// Power-basis polynomial with analytic derivatives, used as an exactness reference.
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {

    pub fn new(coefficients: Vec<f64>) -> Self {
        Polynomial { coefficients }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.derivative(x, 0)
    }

    /// Value of the `order`-th derivative at `x`.
    pub fn derivative(&self, x: f64, order: usize) -> f64 {
        let mut result = 0.0;
        for (power, coefficient) in self.coefficients.iter().enumerate().skip(order) {
            let falling: f64 = (power - order + 1..=power).map(|p| p as f64).product();
            result += coefficient * falling * x.powi((power - order) as i32);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use super::*;

    #[test]
    fn value_is_zeroth_derivative() {
        let eps = 1e-12;
        // 0.5 - x + 3x^2 - 0.2x^4
        let polynomial = Polynomial::new(vec![0.5, -1.0, 3.0, 0.0, -0.2]);

        assert_approx_eq!(0.5, polynomial.evaluate(0.0), eps);
        assert_approx_eq!(0.5 - 1.5 + 6.75 - 1.0125, polynomial.evaluate(1.5), eps);
        assert_approx_eq!(0.5 + 2.0 + 12.0 - 3.2, polynomial.evaluate(-2.0), eps);
        for x in [-1.3, 0.7, 2.2] {
            assert_eq!(polynomial.derivative(x, 0), polynomial.evaluate(x));
        }
    }

    #[test]
    fn derivatives() {
        let eps = 1e-12;
        // 1 + 2x - x^2 + 0.5x^3
        let polynomial = Polynomial::new(vec![1.0, 2.0, -1.0, 0.5]);

        assert_approx_eq!(polynomial.derivative(2.0, 1), 2.0 - 4.0 + 6.0, eps);
        assert_approx_eq!(polynomial.derivative(2.0, 2), -2.0 + 6.0, eps);
        assert_approx_eq!(polynomial.derivative(2.0, 3), 3.0, eps);
        assert_approx_eq!(polynomial.derivative(2.0, 4), 0.0, eps);
    }
}
