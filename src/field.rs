//! 2D fields
//!
//! Closed form fields sampled on regular grids: a sinusoidal intensity
//! field, a sum of Gaussian bumps and a synthetic RGB gradient

use std::f64::consts::PI;

use image::{Rgb, RgbImage};
use itertools::iproduct;

use crate::special::linspace;

mod contour;
pub use contour::{contour_levels, contour_segments, Segment};

/// Field samples on a regular grid
///
/// The samples are stored row-wise: `values[j * nx + i] = f(x[i], y[j])`
#[derive(Debug, Clone, Default)]
pub struct Grid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub values: Vec<f64>,
}
impl Grid {
    /// Samples `f` on the grid `x` × `y`
    pub fn sample<F>(x: Vec<f64>, y: Vec<f64>, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        let values = iproduct!(y.iter(), x.iter())
            .map(|(&y, &x)| f(x, y))
            .collect();
        Self { x, y, values }
    }
    pub fn nx(&self) -> usize {
        self.x.len()
    }
    pub fn ny(&self) -> usize {
        self.y.len()
    }
    /// Returns the sample at `(x[i], y[j])`
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.nx() + i]
    }
    /// Returns the minimum and maximum of the finite samples
    pub fn minmax(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .cloned()
            .filter(|v| v.is_finite())
            .fold(None, |mm, v| match mm {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
    }
    /// Sample spacing along x and y
    pub fn spacing(&self) -> (f64, f64) {
        let step = |v: &[f64]| match v {
            [a, b, ..] => b - a,
            _ => 0f64,
        };
        (step(&self.x), step(&self.y))
    }
    /// Iterator over the grid cells centered on each sample: `(x0, y0, x1, y1, value)`
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64, f64, f64, f64)> + '_ {
        let (dx, dy) = self.spacing();
        iproduct!(self.y.iter(), self.x.iter())
            .zip(self.values.iter())
            .map(move |((&y, &x), &v)| {
                (
                    x - 0.5 * dx,
                    y - 0.5 * dy,
                    x + 0.5 * dx,
                    y + 0.5 * dy,
                    v,
                )
            })
    }
}

/// `sin(x) cos(y)` over `[0, 2π]²`
pub fn intensity_field(nx: usize, ny: usize) -> Grid {
    Grid::sample(
        linspace(0., 2. * PI, nx),
        linspace(0., 2. * PI, ny),
        |x, y| x.sin() * y.cos(),
    )
}

// (amplitude, x center, y center, width²)
const BUMPS: [(f64, f64, f64, f64); 3] = [
    (1.0, 1.0, 1.0, 1.0),
    (0.8, -1.2, -0.8, 0.6),
    (-0.6, -0.5, 1.5, 0.4),
];

/// Sum of Gaussian bumps over `[-3, 3]²`
pub fn gaussian_bumps(nx: usize, ny: usize) -> Grid {
    Grid::sample(linspace(-3., 3., nx), linspace(-3., 3., ny), |x, y| {
        BUMPS
            .iter()
            .map(|&(a, x0, y0, w2)| {
                a * (-((x - x0).powi(2) + (y - y0).powi(2)) / w2).exp()
            })
            .sum()
    })
}

/// Synthetic RGB gradient
///
/// Red ramps left to right, green ramps top to bottom and blue is the
/// complement of red
pub fn rgb_gradient(width: u32, height: u32) -> RgbImage {
    let ramp = |k: u32, n: u32| -> u8 {
        if n < 2 {
            0
        } else {
            (255 * k / (n - 1)) as u8
        }
    };
    RgbImage::from_fn(width, height, |i, j| {
        let r = ramp(i, width);
        Rgb([r, ramp(j, height), 255 - r])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_layout() {
        let grid = Grid::sample(vec![0., 1., 2.], vec![10., 20.], |x, y| x + y);
        assert_eq!(grid.values.len(), 6);
        assert_eq!(grid.value(2, 0), 12.);
        assert_eq!(grid.value(0, 1), 20.);
        assert_eq!(grid.minmax(), Some((10., 22.)));
        assert_eq!(grid.spacing(), (1., 10.));
        let (x0, y0, x1, y1, v) = grid.cells().nth(1).unwrap();
        assert_eq!((x0, y0, x1, y1, v), (0.5, 5., 1.5, 15., 11.));
    }

    #[test]
    fn intensity_range() {
        let grid = intensity_field(101, 101);
        let (min, max) = grid.minmax().unwrap();
        assert!((min + 1.).abs() < 1e-3);
        assert!((max - 1.).abs() < 1e-3);
        assert!(grid.value(0, 0).abs() < 1e-12);
    }

    #[test]
    fn bumps_peak() {
        let grid = gaussian_bumps(61, 61);
        // x = y = 1 is sample 40
        let peak = grid.value(40, 40);
        let (_, max) = grid.minmax().unwrap();
        assert_eq!(peak, max);
        assert!(grid.minmax().unwrap().0 < 0.);
    }

    #[test]
    fn gradient_corners() {
        let img = rgb_gradient(256, 128);
        assert_eq!(img.dimensions(), (256, 128));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 255]));
        assert_eq!(img.get_pixel(255, 127), &Rgb([255, 255, 0]));
    }
}
