//! Bracketed scalar root finding (Brent's method).
//!
//! Used for the mixed-potential charge balance; the iteration count is hard
//! bounded and non-convergence is reported with the attempted bracket and
//! the best residual seen, never papered over with a guess.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RootError {
    #[error("no sign change on [{lo}, {hi}]: f(lo)={f_lo:.3e}, f(hi)={f_hi:.3e}")]
    NoBracket { lo: f64, hi: f64, f_lo: f64, f_hi: f64 },

    #[error("no convergence in {iterations} iterations: best x={best_x}, residual={residual:.3e}")]
    MaxIterations {
        iterations: usize,
        best_x: f64,
        residual: f64,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Root {
    pub x: f64,
    pub f_x: f64,
    pub iterations: usize,
}

/// Find a root of `f` on `[lo, hi]` with Brent's method.
///
/// `tol_x` is the absolute tolerance on x; iterations are capped at
/// `max_iter`. The bracket endpoints must straddle a sign change.
pub fn brent<F: Fn(f64) -> f64>(
    f: F,
    lo: f64,
    hi: f64,
    tol_x: f64,
    max_iter: usize,
) -> Result<Root, RootError> {
    let mut a = lo;
    let mut b = hi;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa == 0.0 {
        return Ok(Root { x: a, f_x: 0.0, iterations: 0 });
    }
    if fb == 0.0 {
        return Ok(Root { x: b, f_x: 0.0, iterations: 0 });
    }
    if fa.signum() == fb.signum() {
        return Err(RootError::NoBracket { lo, hi, f_lo: fa, f_hi: fb });
    }

    // b is the best iterate, a its counterpart, c the previous b.
    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }
    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut bisected = true;

    for k in 0..max_iter {
        let s = if fa != fc && fb != fc {
            // Inverse quadratic interpolation
            a * fb * fc / ((fa - fb) * (fa - fc))
                + b * fa * fc / ((fb - fa) * (fb - fc))
                + c * fa * fb / ((fc - fa) * (fc - fb))
        } else {
            // Secant
            b - fb * (b - a) / (fb - fa)
        };

        let mid = (3.0 * a + b) / 4.0;
        let use_bisection = !(((s > mid) && (s < b)) || ((s < mid) && (s > b)))
            || (bisected && (s - b).abs() >= (b - c).abs() / 2.0)
            || (!bisected && (s - b).abs() >= (c - d).abs() / 2.0)
            || (bisected && (b - c).abs() < tol_x)
            || (!bisected && (c - d).abs() < tol_x);

        let s = if use_bisection { (a + b) / 2.0 } else { s };
        bisected = use_bisection;

        let fs = f(s);
        d = c;
        c = b;
        fc = fb;

        if fa.signum() != fs.signum() {
            b = s;
            fb = fs;
        } else {
            a = s;
            fa = fs;
        }
        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }

        if fb == 0.0 || (a - b).abs() < tol_x {
            return Ok(Root { x: b, f_x: fb, iterations: k + 1 });
        }
    }

    Err(RootError::MaxIterations {
        iterations: max_iter,
        best_x: b,
        residual: fb.abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_root() {
        let r = brent(|x| 2.0 * x - 1.0, -4.0, 4.0, 1e-12, 100).unwrap();
        assert!((r.x - 0.5).abs() < 1e-10, "x = {}", r.x);
    }

    #[test]
    fn test_cubic_root() {
        let r = brent(|x| x * x * x - 2.0, 0.0, 2.0, 1e-12, 100).unwrap();
        assert!((r.x - 2.0_f64.powf(1.0 / 3.0)).abs() < 1e-9, "x = {}", r.x);
    }

    #[test]
    fn test_exponential_crossing() {
        // Shape of a mixed-potential residual: exp rise vs exp decay.
        let f = |e: f64| 1e-8 * (20.0 * e).exp() - 1e-5 * (-120.0 * e).exp();
        let r = brent(f, -1.0, 1.0, 1e-10, 100).unwrap();
        assert!(r.f_x.abs() < 1e-8);
        assert!(r.iterations <= 100);
    }

    #[test]
    fn test_no_bracket() {
        let err = brent(|x| x * x + 1.0, -1.0, 1.0, 1e-12, 100).unwrap_err();
        match err {
            RootError::NoBracket { f_lo, f_hi, .. } => {
                assert!(f_lo > 0.0 && f_hi > 0.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_endpoint_root() {
        let r = brent(|x| x, 0.0, 1.0, 1e-12, 100).unwrap();
        assert_eq!(r.x, 0.0);
        assert_eq!(r.iterations, 0);
    }
}
