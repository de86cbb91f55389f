use crate::{
    optimize::{self, Minimum, OptimizeError, Options},
    special::{bessel_j, linspace},
};

/// Number of samples of the Bessel curve
pub const N_SAMPLE: usize = 5000;
/// Initial guess of the extremum search
pub const X0: f64 = 1.;

/// Bessel function `J_n` sampled over `[0, 10]` with its first maximum
#[derive(Debug, Clone)]
pub struct BesselCurve {
    pub order: u32,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// The minimum of `-J_n` found from [X0]
    pub extremum: Minimum,
}
impl BesselCurve {
    pub fn new(order: u32) -> Result<Self, OptimizeError> {
        let extremum = optimize::minimize(|x| -bessel_j(order, x), X0, &Options::default())?;
        if !extremum.converged {
            log::warn!(
                "J{} extremum search did not converge after {} iterations",
                order,
                extremum.iterations
            );
        }
        let x = linspace(0., 10., N_SAMPLE);
        let y = x.iter().map(|&x| bessel_j(order, x)).collect();
        Ok(Self {
            order,
            x,
            y,
            extremum,
        })
    }
    /// The extremum as a point on the curve
    pub fn peak(&self) -> (f64, f64) {
        (self.extremum.x, -self.extremum.value)
    }
    /// Iterator over the `(x, J_n(x))` samples
    pub fn xy_iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().cloned().zip(self.y.iter().cloned())
    }
    pub fn minmax(&self) -> (f64, f64) {
        let min = self.y.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self.y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_order() {
        let curve = BesselCurve::new(3).unwrap();
        assert_eq!(curve.x.len(), N_SAMPLE);
        let (x, y) = curve.peak();
        assert!((x - 4.2012).abs() < 1e-3);
        assert!((y - 0.4344).abs() < 1e-4);
        // the peak is the largest sample
        let (_, max) = curve.minmax();
        assert!((max - y).abs() < 1e-6);
    }
}
