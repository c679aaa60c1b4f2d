//! Bounded scalar Newton iteration.
//!
//! Solves the passive-film implicit relation; the caller supplies the
//! residual and its derivative in one closure so the two stay consistent.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NewtonError {
    #[error("no convergence in {iterations} iterations: last x={last_x:.6e}, residual={residual:.3e}")]
    MaxIterations {
        iterations: usize,
        last_x: f64,
        residual: f64,
    },

    #[error("zero derivative at x={x:.6e}")]
    ZeroDerivative { x: f64 },
}

/// Newton iteration on `f(x) = 0` starting at `x0`.
///
/// `f_df` returns `(f(x), f'(x))`. Converges on relative step size
/// `tol_rel`; iterations are capped at `max_iter`.
pub fn newton<F: Fn(f64) -> (f64, f64)>(
    f_df: F,
    x0: f64,
    tol_rel: f64,
    max_iter: usize,
) -> Result<f64, NewtonError> {
    let mut x = x0;
    for _ in 0..max_iter {
        let (fx, dfx) = f_df(x);
        if dfx == 0.0 {
            return Err(NewtonError::ZeroDerivative { x });
        }
        let x_new = x - fx / dfx;
        let err = if x != 0.0 {
            ((x_new - x) / x).abs()
        } else {
            (x_new - x).abs()
        };
        if err <= tol_rel {
            return Ok(x_new);
        }
        x = x_new;
    }
    let (fx, _) = f_df(x);
    Err(NewtonError::MaxIterations {
        iterations: max_iter,
        last_x: x,
        residual: fx.abs(),
    })
}
