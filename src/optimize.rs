//! Unconstrained scalar minimization
//!
//! A one dimensional quasi-Newton (BFGS) minimizer with finite difference
//! gradients and a backtracking line search.

#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    #[error("objective is not finite at the initial guess x0={0}")]
    NonFinite(f64),
    #[error("invalid option: {0}")]
    Options(String),
}
type Result<T> = std::result::Result<T, OptimizeError>;

/// Minimizer options
#[derive(Debug, Clone)]
pub struct Options {
    /// Gradient norm below which the search stops
    pub gtol: f64,
    /// Maximum number of iterations
    pub max_iter: usize,
    /// Relative step of the central difference gradient
    pub eps: f64,
    /// Sufficient decrease constant of the Armijo condition
    pub c1: f64,
}
impl Default for Options {
    fn default() -> Self {
        Self {
            gtol: 1e-5,
            max_iter: 200,
            eps: 1e-6,
            c1: 1e-4,
        }
    }
}

/// Minimization result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimum {
    /// The minimum location
    pub x: f64,
    /// The objective at `x`
    pub value: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Whether the gradient tolerance was reached
    pub converged: bool,
}

fn gradient<F: Fn(f64) -> f64>(f: &F, x: f64, eps: f64) -> f64 {
    let h = eps * x.abs().max(1.);
    (f(x + h) - f(x - h)) / (2. * h)
}

/// Minimizes `f` starting from `x0`
///
/// Failing to reach the gradient tolerance within `max_iter` iterations or
/// a stalled line search is not an error: the last iterate is returned with
/// `converged` set to `false`.
pub fn minimize<F>(f: F, x0: f64, options: &Options) -> Result<Minimum>
where
    F: Fn(f64) -> f64,
{
    if !(options.gtol > 0. && options.eps > 0.) {
        return Err(OptimizeError::Options(format!(
            "gtol ({}) and eps ({}) must be positive",
            options.gtol, options.eps
        )));
    }
    let mut x = x0;
    let mut fx = f(x);
    if !fx.is_finite() {
        return Err(OptimizeError::NonFinite(x0));
    }
    let mut g = gradient(&f, x, options.eps);
    // inverse Hessian estimate
    let mut h_inv = 1f64;

    let mut iterations = 0;
    while iterations < options.max_iter {
        if g.abs() < options.gtol {
            break;
        }
        iterations += 1;
        let mut p = -h_inv * g;
        if p * g >= 0. {
            h_inv = 1.;
            p = -g;
        }
        let mut alpha = 1f64;
        let (x_next, f_next) = loop {
            let x_trial = x + alpha * p;
            let f_trial = f(x_trial);
            if f_trial.is_finite() && f_trial <= fx + options.c1 * alpha * g * p {
                break (x_trial, f_trial);
            }
            alpha *= 0.5;
            if alpha < 1e-12 {
                log::warn!("line search stalled at x={}", x);
                return Ok(Minimum {
                    x,
                    value: fx,
                    iterations,
                    converged: false,
                });
            }
        };
        let g_next = gradient(&f, x_next, options.eps);
        let s = x_next - x;
        let y = g_next - g;
        if s * y > 0. {
            h_inv = s / y;
        }
        x = x_next;
        fx = f_next;
        g = g_next;
    }
    let converged = g.abs() < options.gtol;
    log::debug!(
        "minimize: x={:.6}, f={:.6}, {} iterations, converged: {}",
        x,
        fx,
        iterations,
        converged
    );
    Ok(Minimum {
        x,
        value: fx,
        iterations,
        converged,
    })
}
