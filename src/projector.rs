// Copyright (c) 2026 Ken Barker

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

//! The projector module contains the forward and inverse Gauss-Krüger
//! projections.
//!
//! The Krüger series formulas are those given by Lantmäteriet in
//! [Gauss Conformal Projection (Transverse Mercator), Krüger's formulas](https://www.lantmateriet.se/globalassets/geodata/gps-och-geodetisk-matning/gauss_conformal_projection.pdf).
//!
//! Far outside a projection's zone the series lose accuracy: the results are
//! still finite but no longer meaningful.

use crate::{
    check_coordinate, Degrees, Ellipsoid, Error, GeodeticCoordinate, GridCoordinate, Metres,
    ProjectionParameters, Radians,
};
use log::debug;

/// Round a grid coordinate value to the nearest millimetre.
#[must_use]
fn round_to_millimetres(value: f64) -> f64 {
    libm::round(value * 1000.0) / 1000.0
}

/// A Gauss-Krüger projection: a set of `ProjectionParameters` with a
/// central meridian, together with the constants derived from its ellipsoid.
#[derive(Clone, Debug, PartialEq)]
pub struct Projector {
    /// The projection parameters.
    parameters: ProjectionParameters,
    /// The projection constants of the ellipsoid.
    ellipsoid: Ellipsoid,
    /// The central meridian.
    central_meridian: Radians,
}

impl Projector {
    /// Constructor.
    /// * `parameters` - the projection parameters.
    ///
    /// # Errors
    ///
    /// `Error::MissingParameter` if `parameters` has no central meridian.
    pub fn new(parameters: &ProjectionParameters) -> Result<Self, Error> {
        parameters.central_meridian().map_or_else(
            || {
                debug!("projection parameters have no central meridian");
                Err(Error::MissingParameter)
            },
            |central_meridian| Ok(Self::with_central_meridian(*parameters, central_meridian)),
        )
    }

    #[must_use]
    pub(crate) fn with_central_meridian(
        parameters: ProjectionParameters,
        central_meridian: Degrees,
    ) -> Self {
        Self {
            parameters,
            ellipsoid: parameters.ellipsoid(),
            central_meridian: Radians(central_meridian.0.to_radians()),
        }
    }

    /// Accessor for the projection parameters.
    #[must_use]
    pub const fn parameters(&self) -> &ProjectionParameters {
        &self.parameters
    }

    /// Accessor for the projection constants of the ellipsoid.
    #[must_use]
    pub const fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// The scale factor times the rectifying radius.
    const fn scaled_radius(&self) -> f64 {
        self.parameters.scale() * self.ellipsoid.a_roof().0
    }

    /// Convert a geodetic coordinate into a grid coordinate.
    /// * `coordinate` - the geodetic coordinate.
    ///
    /// returns the grid coordinate, rounded to the nearest millimetre.
    ///
    /// # Errors
    ///
    /// `Error::InvalidCoordinate` if `coordinate` is outside the valid
    /// latitude and longitude ranges.
    pub fn forward(&self, coordinate: &GeodeticCoordinate) -> Result<GridCoordinate, Error> {
        check_coordinate(coordinate)?;
        Ok(self.project(coordinate))
    }

    /// Convert a geodetic coordinate that has already been checked into a
    /// grid coordinate.
    #[must_use]
    pub(crate) fn project(&self, coordinate: &GeodeticCoordinate) -> GridCoordinate {
        let phi = Radians(coordinate.latitude().0.to_radians());
        let delta_lambda = coordinate.longitude().0.to_radians() - self.central_meridian.0;

        let phi_star = self.ellipsoid.calculate_conformal_latitude(phi).0;
        let xi_prime = libm::atan(libm::tan(phi_star) / libm::cos(delta_lambda));
        let eta_prime = libm::atanh(libm::cos(phi_star) * libm::sin(delta_lambda));
        let (xi_sum, eta_sum) = self.ellipsoid.calculate_forward_series(xi_prime, eta_prime);

        let radius = self.scaled_radius();
        let x = radius * (xi_prime + xi_sum) + self.parameters.false_northing().0;
        let y = radius * (eta_prime + eta_sum) + self.parameters.false_easting().0;

        GridCoordinate::new(
            Metres(round_to_millimetres(x)),
            Metres(round_to_millimetres(y)),
        )
    }

    /// Convert a grid coordinate into a geodetic coordinate.
    /// * `coordinate` - the grid coordinate.
    ///
    /// returns the geodetic coordinate, it is not rounded.
    #[must_use]
    pub fn inverse(&self, coordinate: &GridCoordinate) -> GeodeticCoordinate {
        let radius = self.scaled_radius();
        let xi = (coordinate.x().0 - self.parameters.false_northing().0) / radius;
        let eta = (coordinate.y().0 - self.parameters.false_easting().0) / radius;

        let (xi_sum, eta_sum) = self.ellipsoid.calculate_inverse_series(xi, eta);
        let xi_prime = xi - xi_sum;
        let eta_prime = eta - eta_sum;

        let phi_star = libm::asin(libm::sin(xi_prime) / libm::cosh(eta_prime));
        let delta_lambda = libm::atan(libm::sinh(eta_prime) / libm::cos(xi_prime));

        let phi = self.ellipsoid.calculate_geodetic_latitude(Radians(phi_star));
        let lambda = self.central_meridian.0 + delta_lambda;

        GeodeticCoordinate::new(Degrees(phi.0.to_degrees()), Degrees(lambda.to_degrees()))
    }
}

impl TryFrom<&ProjectionParameters> for Projector {
    type Error = Error;

    fn try_from(parameters: &ProjectionParameters) -> Result<Self, Self::Error> {
        Self::new(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::grs80;
    use crate::Projection;
    use angle_sc::is_within_tolerance;

    /// The test case from Lantmäteriet's description of the Krüger formulas.
    fn lantmateriet_test_case() -> ProjectionParameters {
        ProjectionParameters::new(
            grs80::A,
            grs80::F,
            Some(Degrees(13.0 + 35.0 / 60.0 + 7.692 / 3600.0)),
            Degrees(0.0),
            1.000_002_54,
            Metres(-6_226_307.864),
            Metres(84_182.879),
        )
    }

    #[test]
    fn test_round_to_millimetres() {
        assert_eq!(1.235, round_to_millimetres(1.2346));
        assert_eq!(-1.235, round_to_millimetres(-1.2346));
        assert_eq!(1_135_809.414, round_to_millimetres(1_135_809.413_809_945_8));
        assert_eq!(0.0, round_to_millimetres(0.0004));
    }

    #[test]
    fn test_forward_lantmateriet_test_case() {
        let projector = Projector::new(&lantmateriet_test_case()).unwrap();
        let a = GeodeticCoordinate::new(Degrees(66.0), Degrees(24.0));
        let result = projector.forward(&a).unwrap();

        assert!(is_within_tolerance(1_135_809.413_803, result.x().0, 1e-3));
        assert!(is_within_tolerance(555_304.016_555, result.y().0, 1e-3));
        assert_eq!(Metres(1_135_809.414), result.x());
        assert_eq!(Metres(555_304.017), result.y());
    }

    #[test]
    fn test_inverse_lantmateriet_test_case() {
        let projector = Projector::new(&lantmateriet_test_case()).unwrap();
        let a = GridCoordinate::new(Metres(1_135_809.413_803), Metres(555_304.016_555));
        let result = projector.inverse(&a);

        assert!(is_within_tolerance(66.0, result.latitude().0, 1e-8));
        assert!(is_within_tolerance(24.0, result.longitude().0, 1e-8));
    }

    #[test]
    fn test_projector_missing_parameter() {
        assert_eq!(
            Err(Error::MissingParameter),
            Projector::new(&ProjectionParameters::UNSET)
        );

        let parameters = ProjectionParameters::new(
            grs80::A,
            grs80::F,
            None,
            Degrees(0.0),
            0.9996,
            Metres(0.0),
            Metres(500_000.0),
        );
        assert_eq!(Err(Error::MissingParameter), Projector::try_from(&parameters));
    }

    #[test]
    fn test_forward_invalid_coordinate() {
        let projector = Projection::Sweref99Tm.projector();
        for (lat, lon) in [(91.0, 15.0), (-91.0, 15.0), (60.0, 181.0), (60.0, -181.0)] {
            let a = GeodeticCoordinate::new(Degrees(lat), Degrees(lon));
            assert_eq!(Err(Error::InvalidCoordinate), projector.forward(&a));
        }
    }

    #[test]
    fn test_forward_and_project_agree() {
        let projector = Projection::Sweref99_1545.projector();
        let a = GeodeticCoordinate::new(Degrees(57.5), Degrees(16.25));
        assert_eq!(Ok(projector.project(&a)), projector.forward(&a));

        // the coordinate is checked before the parameters
        let b = GeodeticCoordinate::new(Degrees(-90.5), Degrees(16.25));
        assert_eq!(Err(Error::InvalidCoordinate), projector.forward(&b));
        assert_eq!(
            Err(Error::InvalidCoordinate),
            crate::forward_project(&ProjectionParameters::UNSET, &b)
        );
    }

    #[test]
    fn test_forward_on_central_meridian() {
        let projector = Projection::Sweref99Tm.projector();

        let equator = GeodeticCoordinate::new(Degrees(0.0), Degrees(15.0));
        let result = projector.forward(&equator).unwrap();
        assert_eq!(Metres(0.0), result.x());
        assert_eq!(Metres(500_000.0), result.y());

        let a = GeodeticCoordinate::new(Degrees(62.0), Degrees(15.0));
        let result = projector.forward(&a).unwrap();
        assert_eq!(Metres(500_000.0), result.y());
        assert!(6_800_000.0 < result.x().0 && result.x().0 < 6_900_000.0);
    }

    #[test]
    fn test_inverse_at_false_origin() {
        let projector = Projection::Sweref99_1630.projector();
        let origin = GridCoordinate::new(Metres(0.0), Metres(150_000.0));
        let result = projector.inverse(&origin);

        assert_eq!(0.0, result.latitude().0);
        assert!(is_within_tolerance(16.5, result.longitude().0, 1e-12));
    }

    #[test]
    fn test_forward_inverse_round_trip() {
        for projection in Projection::ALL {
            let projector = projection.projector();
            let central_meridian = projection.central_meridian().0;
            for lat in [55.25, 58.5, 61.75, 65.0, 69.0] {
                for delta in [-1.5, -0.25, 0.0, 0.75, 1.5] {
                    let a = GeodeticCoordinate::new(
                        Degrees(lat),
                        Degrees(central_meridian + delta),
                    );
                    let grid = projector.forward(&a).unwrap();
                    let b = projector.inverse(&grid);
                    assert!(is_within_tolerance(lat, b.latitude().0, 1e-6));
                    assert!(is_within_tolerance(
                        central_meridian + delta,
                        b.longitude().0,
                        1e-6
                    ));
                }
            }
        }
    }

    #[test]
    fn test_forward_is_deterministic() {
        let projector = Projector::new(&Projection::Rt90_0_0GonV.parameters()).unwrap();
        let a = GeodeticCoordinate::new(Degrees(59.3293), Degrees(18.0686));

        let first = projector.forward(&a).unwrap();
        let first_inverse = projector.inverse(&first);
        for _ in 0..10 {
            let result = projector.forward(&a).unwrap();
            assert_eq!(first.x().0.to_bits(), result.x().0.to_bits());
            assert_eq!(first.y().0.to_bits(), result.y().0.to_bits());

            let inverse = projector.inverse(&result);
            assert_eq!(
                first_inverse.latitude().0.to_bits(),
                inverse.latitude().0.to_bits()
            );
            assert_eq!(
                first_inverse.longitude().0.to_bits(),
                inverse.longitude().0.to_bits()
            );
        }
    }

    #[test]
    fn test_forward_y_increases_with_longitude() {
        for projection in [
            Projection::Sweref99Tm,
            Projection::Sweref99_1800,
            Projection::Rt90_2_5GonV,
            Projection::BesselRt90_5_0GonO,
        ] {
            let projector = projection.projector();
            let central_meridian = projection.central_meridian().0;

            let mut previous = f64::NEG_INFINITY;
            for i in -20..=20 {
                let lon = central_meridian + f64::from(i) * 0.01;
                let a = GeodeticCoordinate::new(Degrees(60.0), Degrees(lon));
                let result = projector.forward(&a).unwrap();
                assert!(previous < result.y().0);
                previous = result.y().0;
            }
        }
    }

    #[test]
    fn test_forward_x_increases_with_latitude() {
        let projector = Projection::Sweref99Tm.projector();

        let mut previous = f64::NEG_INFINITY;
        for i in 550..=690 {
            let lat = f64::from(i) * 0.1;
            let a = GeodeticCoordinate::new(Degrees(lat), Degrees(16.0));
            let result = projector.forward(&a).unwrap();
            assert!(previous < result.x().0);
            previous = result.x().0;
        }
    }
}
