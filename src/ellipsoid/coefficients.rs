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

//! This module contains the series coefficients and functions used by the
//! Gauss-Krüger projection.
//!
//! The coefficients are the fourth order Krüger series published by
//! Lantmäteriet in
//! [Gauss Conformal Projection (Transverse Mercator), Krüger's formulas](https://www.lantmateriet.se/globalassets/geodata/gps-och-geodetisk-matning/gauss_conformal_projection.pdf).
//! They are accurate to better than a millimetre within the zone widths used
//! by the Swedish grids.

#![allow(clippy::suboptimal_flops)]

use angle_sc::Radians;

/// The coefficients `A`, `B`, `C` and `D` of the series converting a geodetic
/// latitude into a conformal latitude.
/// * `e_2` - the square of the Eccentricity of the ellipsoid.
/// # Examples
/// ```
/// use rt90_sweref99::ellipsoid::{calculate_sq_eccentricity, grs80};
/// use rt90_sweref99::ellipsoid::coefficients::evaluate_coeffs_conformal;
///
/// let coeffs = evaluate_coeffs_conformal(calculate_sq_eccentricity(grs80::F));
///
/// assert_eq!(calculate_sq_eccentricity(grs80::F), coeffs[0]);
/// ```
#[must_use]
pub fn evaluate_coeffs_conformal(e_2: f64) -> [f64; 4] {
    let e_4 = e_2 * e_2;
    let e_6 = e_4 * e_2;
    let e_8 = e_6 * e_2;
    [
        e_2,
        (5.0 * e_4 - e_6) / 6.0,
        (104.0 * e_6 - 45.0 * e_8) / 120.0,
        (1237.0 * e_8) / 1260.0,
    ]
}

/// The coefficients `A*`, `B*`, `C*` and `D*` of the series converting a
/// conformal latitude back into a geodetic latitude.
/// * `e_2` - the square of the Eccentricity of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_geodetic(e_2: f64) -> [f64; 4] {
    let e_4 = e_2 * e_2;
    let e_6 = e_4 * e_2;
    let e_8 = e_6 * e_2;
    [
        e_2 + e_4 + e_6 + e_8,
        -(7.0 * e_4 + 17.0 * e_6 + 30.0 * e_8) / 6.0,
        (224.0 * e_6 + 889.0 * e_8) / 120.0,
        -(4279.0 * e_8) / 1260.0,
    ]
}

/// The forward coefficients `β1` to `β4` of the Krüger series.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_beta(n: f64) -> [f64; 4] {
    let n2 = n * n;
    let n3 = n2 * n;
    let n4 = n3 * n;
    [
        n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0,
        13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0,
        61.0 * n3 / 240.0 - 103.0 * n4 / 140.0,
        49561.0 * n4 / 161_280.0,
    ]
}

/// The inverse coefficients `δ1` to `δ4` of the Krüger series.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_delta(n: f64) -> [f64; 4] {
    let n2 = n * n;
    let n3 = n2 * n;
    let n4 = n3 * n;
    [
        n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0,
        n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0,
        17.0 * n3 / 480.0 - 37.0 * n4 / 840.0,
        4397.0 * n4 / 161_280.0,
    ]
}

/// Evaluate the polynomial in x using
/// [Horner's method](https://en.wikipedia.org/wiki/Horner%27s_method).
/// * `coeffs` - the polynomial coefficients, lowest order first.
/// * `x` - the variable.
#[must_use]
pub fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.split_last().map_or(0.0, |(last, elements)| {
        elements
            .iter()
            .rev()
            .fold(*last, |result, element| libm::fma(result, x, *element))
    })
}

/// Evaluate the latitude correction:
///   `sin(phi) * cos(phi) * sum(c[i] * sin(phi)^(2*i), i, 0, n - 1)`
/// * `coeffs` - the coefficients from `evaluate_coeffs_conformal` or
///   `evaluate_coeffs_geodetic`.
/// * `phi` - the latitude.
#[must_use]
pub fn latitude_series(coeffs: &[f64], phi: Radians) -> Radians {
    let sin_phi = libm::sin(phi.0);
    let cos_phi = libm::cos(phi.0);
    Radians(sin_phi * cos_phi * evaluate_polynomial(coeffs, sin_phi * sin_phi))
}

/// Evaluate the pair of Krüger sums:
///   `sum(c[k] * sin(2*k * xi) * cosh(2*k * eta), k, 1, n)`
///   `sum(c[k] * cos(2*k * xi) * sinh(2*k * eta), k, 1, n)`
/// * `coeffs` - the `β` or `δ` coefficients, `c[1]` first.
/// * `xi`, `eta` - the normalised coordinates on the conformal sphere.
///
/// returns the `xi` and `eta` sums.
#[must_use]
pub fn kruger_series(coeffs: &[f64], xi: f64, eta: f64) -> (f64, f64) {
    let mut xi_sum = 0.0;
    let mut eta_sum = 0.0;
    let mut k = 0.0;
    for c in coeffs {
        k += 2.0;
        xi_sum += c * libm::sin(k * xi) * libm::cosh(k * eta);
        eta_sum += c * libm::cos(k * xi) * libm::sinh(k * eta);
    }
    (xi_sum, eta_sum)
}
