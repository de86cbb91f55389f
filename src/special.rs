//! Special functions
//!
//! Integer order Bessel functions of the first kind and sampling helpers

use scilib::math::bessel;

/// Evenly spaced samples over `[start, end]`, both ends included
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// Bessel function of the first kind of integer order `n`
///
/// Non-finite arguments give `NaN`
pub fn bessel_j(n: u32, x: f64) -> f64 {
    if !x.is_finite() {
        return f64::NAN;
    }
    match n.try_into() {
        Ok(n) => bessel::j_n(n, x),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_ends() {
        let x = linspace(0., 10., 5000);
        assert_eq!(x.len(), 5000);
        assert_eq!(x[0], 0.);
        assert_eq!(*x.last().unwrap(), 10.);
        assert!(x.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(linspace(2., 3., 1), vec![2.]);
        assert!(linspace(2., 3., 0).is_empty());
    }

    #[test]
    fn bessel_table() {
        let table = [
            (0, 0., 1.),
            (1, 0., 0.),
            (3, 0., 0.),
            (0, 1., 0.765_197_686_557_966_6),
            (1, 1., 0.440_050_585_744_933_5),
            (2, 5., 0.046_565_116_277_752_2),
            (1, 10., 0.043_472_746_168_861_4),
            (3, 2.5, 0.216_600_391_039_113_4),
        ];
        for (n, x, expected) in table {
            let j = bessel_j(n, x);
            assert!(
                (j - expected).abs() < 1e-9,
                "J{}({}) = {} != {}",
                n,
                x,
                j,
                expected
            );
        }
    }

    #[test]
    fn bessel_first_zero() {
        assert!(bessel_j(0, 2.404_825_557_695_773).abs() < 1e-9);
    }

    #[test]
    fn bessel_parity() {
        for x in [0.3, 1.7, 6.2] {
            assert!((bessel_j(3, -x) + bessel_j(3, x)).abs() < 1e-10);
            assert!((bessel_j(2, -x) - bessel_j(2, x)).abs() < 1e-10);
        }
    }

    #[test]
    fn bessel_non_finite() {
        assert!(bessel_j(3, f64::INFINITY).is_nan());
        assert!(bessel_j(3, f64::NAN).is_nan());
    }
}
