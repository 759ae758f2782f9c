// Copyright (c) 2024-2026 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The ellipsoid module contains functions for deriving the constants of the
//! Gauss-Krüger projection from an ellipsoid's Semimajor axis and flattening
//! ratio.

#![allow(clippy::suboptimal_flops)]

pub mod bessel;
pub mod coefficients;
pub mod grs80;

use crate::Metres;

/// Calculate the square of the Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use rt90_sweref99::ellipsoid::{calculate_sq_eccentricity, grs80};
///
/// // The GRS 80 sq_eccentricity.
/// assert_eq!(0.006694380022900787, calculate_sq_eccentricity(grs80::F));
/// ```
#[must_use]
pub fn calculate_sq_eccentricity(f: f64) -> f64 {
    f * (2.0 - f)
}

/// Calculate the third flattening of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use rt90_sweref99::ellipsoid::{calculate_3rd_flattening, grs80};
///
/// // The GRS 80 3rd flattening.
/// assert_eq!(0.0016792203946287448, calculate_3rd_flattening(grs80::F));
/// ```
#[must_use]
pub fn calculate_3rd_flattening(f: f64) -> f64 {
    f / (2.0 - f)
}

/// Calculate the rectifying radius of an ellipsoid, `Â`.
///
/// A meridian of the ellipsoid has the same length as a great circle on a
/// sphere of this radius.
/// * `a` - the Semimajor axis of the ellipsoid.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn calculate_rectifying_radius(a: Metres, n: f64) -> Metres {
    let n2 = n * n;
    Metres(a.0 / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_calculate_rectifying_radius() {
        let n = calculate_3rd_flattening(grs80::F);
        let result = calculate_rectifying_radius(grs80::A, n);
        assert!(is_within_tolerance(6_367_449.145_771_048, result.0, 1e-8));

        let n = calculate_3rd_flattening(bessel::F);
        let result = calculate_rectifying_radius(bessel::A, n);
        assert!(is_within_tolerance(6_366_742.520_234_043, result.0, 1e-8));

        // a sphere is its own rectifying sphere
        assert_eq!(grs80::A, calculate_rectifying_radius(grs80::A, 0.0));
    }

    #[test]
    fn test_eccentricity_and_3rd_flattening() {
        assert_eq!(0.0, calculate_sq_eccentricity(0.0));
        assert_eq!(0.0, calculate_3rd_flattening(0.0));

        let e_2 = calculate_sq_eccentricity(bessel::F);
        assert!(is_within_tolerance(0.006_674_372_231_802_145, e_2, 1e-17));
        let n = calculate_3rd_flattening(bessel::F);
        assert!(is_within_tolerance(0.001_674_184_801_114_989, n, 1e-17));
    }
}
