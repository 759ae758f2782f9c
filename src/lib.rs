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

//! rt90-sweref99
//!
//! A library for converting positions between geodetic coordinates
//! (latitude and longitude on an ellipsoid) and the Swedish national grids:
//! [SWEREF 99](https://www.lantmateriet.se/en/geodata/gps-geodesi-och-swepos/reference-systems/three-dimensional-systems/SWEREF-99/)
//! TM, the twelve SWEREF 99 local zones and the six zones of RT90.
//!
//! ## Gauss-Krüger projection
//!
//! All of the grids use the Gauss-Krüger (Transverse Mercator) conformal
//! projection. This library evaluates it with the fourth order Krüger series
//! published by Lantmäteriet, which is closed form (no iteration) and
//! accurate to better than a millimetre across the width of a zone.
//!
//! - [`forward_project`] converts a [`GeodeticCoordinate`] into a
//!   [`GridCoordinate`], rounded to the nearest millimetre;
//! - [`inverse_project`] converts a [`GridCoordinate`] back into a
//!   [`GeodeticCoordinate`] at full precision.
//!
//! Note: following Swedish convention, `x` is the north (latitude dependent)
//! grid coordinate and `y` is the east (longitude dependent) grid coordinate.
//!
//! The library does **not** transform between datums, e.g. from WGS 84 to
//! RT90: the input coordinates must already be referenced to the ellipsoid of
//! the chosen projection.
//!
//! ## Design
//!
//! A projection is defined by an immutable [`ProjectionParameters`] value,
//! usually obtained from one of the named [`Projection`]s.
//! A [`Projector`] validates a `ProjectionParameters` value and precomputes
//! the [`Ellipsoid`] series coefficients, so that it can convert any number of
//! coordinates. The named projections share a lazily built table of
//! `Projector`s, see [`Projection::projector`].
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Degrees`
//!   and `Radians`;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres`;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to convert to and
//!   from `LatLong`.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.

#![cfg_attr(not(test), no_std)]

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod ellipsoid;
pub mod error;
pub mod projection;
pub mod projector;

pub use angle_sc::{Degrees, Radians, Validate};
pub use error::Error;
pub use icao_units::si::Metres;
pub use projection::{Projection, ProjectionParameters};
pub use projector::Projector;
pub use unit_sphere::LatLong;

use ellipsoid::coefficients;
use log::debug;
use serde::{Deserialize, Serialize};

/// The constants of the Gauss-Krüger projection for an ellipsoid.
///
/// They depend only upon the Semimajor axis and flattening of the ellipsoid.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
    /// The third flattening of the ellipsoid.
    n: f64,
    /// The rectifying radius of the ellipsoid.
    a_roof: Metres,

    /// Coefficients of the geodetic to conformal latitude series.
    conformal: [f64; 4],
    /// Coefficients of the conformal to geodetic latitude series.
    geodetic: [f64; 4],
    /// The forward Krüger series `coefficients`.
    beta: [f64; 4],
    /// The inverse Krüger series `coefficients`.
    delta: [f64; 4],
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    #[must_use]
    pub fn new(a: Metres, f: f64) -> Self {
        let e_2 = ellipsoid::calculate_sq_eccentricity(f);
        let n = ellipsoid::calculate_3rd_flattening(f);
        Self {
            a,
            f,
            e_2,
            n,
            a_roof: ellipsoid::calculate_rectifying_radius(a, n),
            conformal: coefficients::evaluate_coeffs_conformal(e_2),
            geodetic: coefficients::evaluate_coeffs_geodetic(e_2),
            beta: coefficients::evaluate_coeffs_beta(n),
            delta: coefficients::evaluate_coeffs_delta(n),
        }
    }

    /// Construct an `Ellipsoid` with the GRS 80 parameters.
    #[must_use]
    pub fn grs80() -> Self {
        Self::new(ellipsoid::grs80::A, ellipsoid::grs80::F)
    }

    /// Construct an `Ellipsoid` with the Bessel 1841 parameters.
    #[must_use]
    pub fn bessel() -> Self {
        Self::new(ellipsoid::bessel::A, ellipsoid::bessel::F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The third flattening of the ellipsoid.
    #[must_use]
    pub const fn n(&self) -> f64 {
        self.n
    }

    /// The rectifying radius of the ellipsoid.
    #[must_use]
    pub const fn a_roof(&self) -> Metres {
        self.a_roof
    }

    /// Convert a geodetic latitude to a conformal latitude.
    /// * `phi` - the geodetic latitude.
    #[must_use]
    pub fn calculate_conformal_latitude(&self, phi: Radians) -> Radians {
        Radians(phi.0 - coefficients::latitude_series(&self.conformal, phi).0)
    }

    /// Convert a conformal latitude to a geodetic latitude.
    /// * `phi_star` - the conformal latitude.
    #[must_use]
    pub fn calculate_geodetic_latitude(&self, phi_star: Radians) -> Radians {
        Radians(phi_star.0 + coefficients::latitude_series(&self.geodetic, phi_star).0)
    }

    /// Evaluate the forward Krüger series at a point on the conformal sphere.
    #[must_use]
    pub fn calculate_forward_series(&self, xi: f64, eta: f64) -> (f64, f64) {
        coefficients::kruger_series(&self.beta, xi, eta)
    }

    /// Evaluate the inverse Krüger series at a normalised grid point.
    #[must_use]
    pub fn calculate_inverse_series(&self, xi: f64, eta: f64) -> (f64, f64) {
        coefficients::kruger_series(&self.delta, xi, eta)
    }
}

/// Test whether a latitude in degrees is within ±90°.
#[must_use]
pub fn is_valid_latitude(degrees: f64) -> bool {
    (-90.0..=90.0).contains(&degrees)
}

/// Test whether a longitude in degrees is within ±180°.
#[must_use]
pub fn is_valid_longitude(degrees: f64) -> bool {
    (-180.0..=180.0).contains(&degrees)
}

/// A position on an ellipsoid, latitude and longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeodeticCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeodeticCoordinate {
    /// Constructor.
    /// * `latitude` - the geodetic latitude.
    /// * `longitude` - the longitude.
    #[must_use]
    pub const fn new(latitude: Degrees, longitude: Degrees) -> Self {
        Self {
            latitude: latitude.0,
            longitude: longitude.0,
        }
    }

    /// The geodetic latitude.
    #[must_use]
    pub const fn latitude(&self) -> Degrees {
        Degrees(self.latitude)
    }

    /// The longitude.
    #[must_use]
    pub const fn longitude(&self) -> Degrees {
        Degrees(self.longitude)
    }
}

impl Validate for GeodeticCoordinate {
    /// Test whether a `GeodeticCoordinate` is valid.
    /// Whether -90° <= `latitude` <= 90° and -180° <= `longitude` <= 180°.
    fn is_valid(&self) -> bool {
        is_valid_latitude(self.latitude) && is_valid_longitude(self.longitude)
    }
}

impl From<&LatLong> for GeodeticCoordinate {
    fn from(a: &LatLong) -> Self {
        Self::new(a.lat(), a.lon())
    }
}

impl From<GeodeticCoordinate> for LatLong {
    fn from(a: GeodeticCoordinate) -> Self {
        Self::new(a.latitude(), a.longitude())
    }
}

/// Check that a geodetic coordinate can be projected.
/// * `coordinate` - the geodetic coordinate.
///
/// # Errors
///
/// `Error::InvalidCoordinate` if `coordinate` is not valid.
pub(crate) fn check_coordinate(coordinate: &GeodeticCoordinate) -> Result<(), Error> {
    if coordinate.is_valid() {
        Ok(())
    } else {
        debug!("rejected geodetic coordinate: {coordinate:?}");
        Err(Error::InvalidCoordinate)
    }
}

/// A position on a projection's grid, in metres.
///
/// `x` is the north coordinate and `y` is the east coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridCoordinate {
    x: f64,
    y: f64,
}

impl GridCoordinate {
    /// Constructor.
    /// * `x` - the north grid coordinate.
    /// * `y` - the east grid coordinate.
    #[must_use]
    pub const fn new(x: Metres, y: Metres) -> Self {
        Self { x: x.0, y: y.0 }
    }

    /// The north grid coordinate.
    #[must_use]
    pub const fn x(&self) -> Metres {
        Metres(self.x)
    }

    /// The east grid coordinate.
    #[must_use]
    pub const fn y(&self) -> Metres {
        Metres(self.y)
    }
}

/// Convert a geodetic coordinate into a grid coordinate.
/// * `parameters` - the projection parameters.
/// * `coordinate` - the geodetic coordinate.
///
/// returns the grid coordinate, rounded to the nearest millimetre.
///
/// # Errors
///
/// `Error::InvalidCoordinate` if `coordinate` is outside the valid latitude
/// and longitude ranges, otherwise `Error::MissingParameter` if `parameters`
/// has no central meridian.
///
/// # Examples
/// ```
/// use rt90_sweref99::*;
///
/// let stockholm = GeodeticCoordinate::new(Degrees(59.3293), Degrees(18.0686));
/// let parameters = Projection::Sweref99Tm.parameters();
/// let grid = forward_project(&parameters, &stockholm).unwrap();
///
/// assert_eq!(Metres(6_580_743.008), grid.x());
/// assert_eq!(Metres(674_571.866), grid.y());
/// ```
pub fn forward_project(
    parameters: &ProjectionParameters,
    coordinate: &GeodeticCoordinate,
) -> Result<GridCoordinate, Error> {
    check_coordinate(coordinate)?;
    Ok(Projector::new(parameters)?.project(coordinate))
}

/// Convert a grid coordinate into a geodetic coordinate.
/// * `parameters` - the projection parameters.
/// * `coordinate` - the grid coordinate.
///
/// returns the geodetic coordinate. Any finite grid coordinate is accepted,
/// but the result is only meaningful within the projection's zone.
///
/// # Errors
///
/// `Error::MissingParameter` if `parameters` has no central meridian.
pub fn inverse_project(
    parameters: &ProjectionParameters,
    coordinate: &GridCoordinate,
) -> Result<GeodeticCoordinate, Error> {
    Ok(Projector::new(parameters)?.inverse(coordinate))
}
