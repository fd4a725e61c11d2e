use log::{trace, warn};

/// Stopping criteria of the Brent root finder.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BrentSettings {
    pub xtol: f64,
    pub rtol: f64,
    pub max_iter: usize,
}

impl Default for BrentSettings {
    fn default() -> Self {
        BrentSettings {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iter: 100,
        }
    }
}

/// Finds a root of `f` in `[xa, xb]` with Brent's method.
///
/// Returns `None` when `f(xa)` and `f(xb)` have the same sign, i.e. when the
/// interval doesn't bracket a root. When the iteration cap is reached the best
/// estimate so far is returned.
pub fn brentq<F>(f: F, xa: f64, xb: f64, settings: &BrentSettings) -> Option<f64> where F: Fn(f64) -> f64 {

    let mut xpre = xa;
    let mut xcur = xb;
    let mut fpre = f(xpre);
    let mut fcur = f(xcur);

    if fpre == 0.0 { return Some(xpre) }
    if fcur == 0.0 { return Some(xcur) }
    if fpre.is_sign_negative() == fcur.is_sign_negative() { return None }

    // xblk is the contrapoint, spre/scur the previous and current step sizes
    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for iter in 0..settings.max_iter {

        if fpre != 0.0 && fcur != 0.0 && fpre.is_sign_negative() != fcur.is_sign_negative() {
            xblk = xpre;
            fblk = fpre;
            scur = xcur - xpre;
            spre = scur;
        }

        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (settings.xtol + settings.rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;

        trace!("brentq iteration {}: x={} f(x)={} bracket half-width={}", iter, xcur, fcur, sbis.abs());

        if fcur == 0.0 || sbis.abs() < delta {
            return Some(xcur);
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic extrapolation
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };

            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }

        fcur = f(xcur);
    }

    warn!("brentq didn't converge after {} iterations, returning last estimate {}", settings.max_iter, xcur);

    Some(xcur)
}
