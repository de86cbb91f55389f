//! Marching squares iso-lines

use super::Grid;

/// Iso-line segment end points in grid coordinates
pub type Segment = ((f64, f64), (f64, f64));

/// `n` evenly spaced levels strictly inside `[min, max]`
pub fn contour_levels(min: f64, max: f64, n: usize) -> Vec<f64> {
    let step = (max - min) / (n + 1) as f64;
    (1..=n).map(|k| min + k as f64 * step).collect()
}

/// Iso-line segments of `grid` at `level`
///
/// Each grid cell is classified by which corners lie at or above `level`;
/// the crossing points are linearly interpolated along the cell edges.
/// Saddle cells are resolved with the cell center average and yield two
/// segments. Cells with a non finite corner are skipped.
pub fn contour_segments(grid: &Grid, level: f64) -> Vec<Segment> {
    let (nx, ny) = (grid.nx(), grid.ny());
    let mut segments = vec![];
    if nx < 2 || ny < 2 {
        return segments;
    }
    let lerp = |va: f64, vb: f64| -> f64 {
        if (vb - va).abs() < f64::EPSILON {
            0.5
        } else {
            (level - va) / (vb - va)
        }
    };
    for j in 0..ny - 1 {
        for i in 0..nx - 1 {
            let v00 = grid.value(i, j);
            let v10 = grid.value(i + 1, j);
            let v01 = grid.value(i, j + 1);
            let v11 = grid.value(i + 1, j + 1);
            if [v00, v10, v01, v11].iter().any(|v| !v.is_finite()) {
                continue;
            }
            let (b00, b10, b01, b11) =
                (v00 >= level, v10 >= level, v01 >= level, v11 >= level);
            let (x0, x1) = (grid.x[i], grid.x[i + 1]);
            let (y0, y1) = (grid.y[j], grid.y[j + 1]);
            let at_x = |t: f64| x0 + t * (x1 - x0);
            let at_y = |t: f64| y0 + t * (y1 - y0);

            let bottom = (b00 != b10).then(|| (at_x(lerp(v00, v10)), y0));
            let right = (b10 != b11).then(|| (x1, at_y(lerp(v10, v11))));
            let top = (b01 != b11).then(|| (at_x(lerp(v01, v11)), y1));
            let left = (b00 != b01).then(|| (x0, at_y(lerp(v00, v01))));

            match (bottom, right, top, left) {
                (Some(b), Some(r), Some(t), Some(l)) => {
                    let center_above = 0.25 * (v00 + v10 + v01 + v11) >= level;
                    // corners that are cut off from the center
                    if center_above == b00 {
                        segments.push((b, r));
                        segments.push((l, t));
                    } else {
                        segments.push((b, l));
                        segments.push((t, r));
                    }
                }
                edges => {
                    let crossings: Vec<_> = [edges.0, edges.1, edges.2, edges.3]
                        .into_iter()
                        .flatten()
                        .collect();
                    if let [a, b] = crossings.as_slice() {
                        segments.push((*a, *b));
                    }
                }
            }
        }
    }
    segments
}
