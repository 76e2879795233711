//! Required structures to project between coordinate reference systems

use geo::{Coord, coord};

use crate::error::GeoError;
use crate::{Crs, WEB_MERCATOR_MAX_LAT, WGS84_FLATTENING, WGS84_SEMI_MAJOR};

/// Allows for projection between geographic coordinates and a planar standard.
pub trait Project {
    /// Projects a geographic (lon, lat) coordinate, in degrees, into the standard.
    ///
    /// ### Example
    /// ```rust
    /// use roadmend_geo::{Project, project::TransverseMercator};
    /// use geo::coord;
    ///
    /// let zone_31 = TransverseMercator::utm(31, true);
    /// let origin = zone_31.forward(coord! { x: 3.0, y: 0.0 }).unwrap();
    /// assert!((origin.x - 500_000.0).abs() < 1e-6);
    /// ```
    fn forward(&self, geographic: Coord) -> Result<Coord, GeoError>;

    /// Projects a coordinate of the standard back into geographic (lon, lat) degrees.
    fn inverse(&self, planar: Coord) -> Result<Coord, GeoError>;
}

#[doc(hidden)]
pub mod projections {
    /// Spherical mercator on the WGS84 semi-major axis.
    /// *Learn more [here](https://en.wikipedia.org/wiki/Web_Mercator_projection?useskin=vector).*
    pub struct WebMercator;

    /// Ellipsoidal transverse mercator on WGS84, as used by UTM.
    ///
    /// Series expansions follow Snyder, *Map Projections: A Working Manual*
    /// (USGS PP 1395), equations 8-9 to 8-25. They stay well below a millimetre
    /// of error within a zone's 6° width.
    pub struct TransverseMercator {
        pub central_meridian: f64,
        pub scale: f64,
        pub false_easting: f64,
        pub false_northing: f64,
    }
}

#[doc(inline)]
pub use projections::TransverseMercator;
#[doc(inline)]
pub use projections::WebMercator;

const UTM_SCALE: f64 = 0.9996;
const UTM_FALSE_EASTING: f64 = 500_000.0;
const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

fn eccentricity_squared() -> f64 {
    WGS84_FLATTENING * (2.0 - WGS84_FLATTENING)
}

impl TransverseMercator {
    pub fn utm(zone: u8, north: bool) -> Self {
        TransverseMercator {
            central_meridian: (zone as f64 - 1.0) * 6.0 - 180.0 + 3.0,
            scale: UTM_SCALE,
            false_easting: UTM_FALSE_EASTING,
            false_northing: if north { 0.0 } else { UTM_FALSE_NORTHING_SOUTH },
        }
    }

    /// Distance along the meridian from the equator to `phi` (radians).
    fn meridian_arc(phi: f64) -> f64 {
        let e2 = eccentricity_squared();
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        WGS84_SEMI_MAJOR
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
    }
}

impl Project for TransverseMercator {
    fn forward(&self, geographic: Coord) -> Result<Coord, GeoError> {
        let (lon, lat) = geographic.x_y();
        if !lon.is_finite() || !lat.is_finite() {
            return Err(GeoError::NonFinite);
        }

        let e2 = eccentricity_squared();
        let ep2 = e2 / (1.0 - e2);

        let phi = lat.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        let n = WGS84_SEMI_MAJOR / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let t = phi.tan().powi(2);
        let c = ep2 * cos_phi * cos_phi;
        let a = (lon - self.central_meridian).to_radians() * cos_phi;
        let m = Self::meridian_arc(phi);

        let x = self.false_easting
            + self.scale
                * n
                * (a + (1.0 - t + c) * a.powi(3) / 6.0
                    + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0);

        let y = self.false_northing
            + self.scale
                * (m + n
                    * phi.tan()
                    * (a * a / 2.0
                        + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                        + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6)
                            / 720.0));

        Ok(coord! { x: x, y: y })
    }

    fn inverse(&self, planar: Coord) -> Result<Coord, GeoError> {
        let (x, y) = planar.x_y();
        if !x.is_finite() || !y.is_finite() {
            return Err(GeoError::NonFinite);
        }

        let e2 = eccentricity_squared();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let ep2 = e2 / (1.0 - e2);

        let m = (y - self.false_northing) / self.scale;
        let mu = m / (WGS84_SEMI_MAJOR * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));

        let root = (1.0 - e2).sqrt();
        let e1 = (1.0 - root) / (1.0 + root);

        // Footpoint latitude
        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

        let (sin_phi1, cos_phi1) = phi1.sin_cos();
        let c1 = ep2 * cos_phi1 * cos_phi1;
        let t1 = phi1.tan().powi(2);
        let n1 = WGS84_SEMI_MAJOR / (1.0 - e2 * sin_phi1 * sin_phi1).sqrt();
        let r1 = WGS84_SEMI_MAJOR * (1.0 - e2) / (1.0 - e2 * sin_phi1 * sin_phi1).powf(1.5);
        let d = (x - self.false_easting) / (n1 * self.scale);

        let phi = phi1
            - (n1 * phi1.tan() / r1)
                * (d * d / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * ep2
                        - 3.0 * c1 * c1)
                        * d.powi(6)
                        / 720.0);

        let lambda = (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                * d.powi(5)
                / 120.0)
            / cos_phi1;

        Ok(coord! {
            x: self.central_meridian + lambda.to_degrees(),
            y: phi.to_degrees(),
        })
    }
}

impl Project for WebMercator {
    fn forward(&self, geographic: Coord) -> Result<Coord, GeoError> {
        let (lon, lat) = geographic.x_y();
        if !lon.is_finite() || !lat.is_finite() {
            return Err(GeoError::NonFinite);
        }

        if lat.abs() > WEB_MERCATOR_MAX_LAT {
            return Err(GeoError::OutsideProjection {
                crs: Crs::WebMercator,
                x: lon,
                y: lat,
            });
        }

        let x = WGS84_SEMI_MAJOR * lon.to_radians();
        let y = WGS84_SEMI_MAJOR
            * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0)
                .tan()
                .ln();

        Ok(coord! { x: x, y: y })
    }

    fn inverse(&self, planar: Coord) -> Result<Coord, GeoError> {
        let (x, y) = planar.x_y();
        if !x.is_finite() || !y.is_finite() {
            return Err(GeoError::NonFinite);
        }

        let lon = (x / WGS84_SEMI_MAJOR).to_degrees();
        let lat = (2.0 * (y / WGS84_SEMI_MAJOR).exp().atan() - std::f64::consts::FRAC_PI_2)
            .to_degrees();

        Ok(coord! { x: lon, y: lat })
    }
}

impl Project for Crs {
    fn forward(&self, geographic: Coord) -> Result<Coord, GeoError> {
        match self {
            Crs::Geographic => Ok(geographic),
            Crs::WebMercator => WebMercator.forward(geographic),
            Crs::Utm { zone, north } => TransverseMercator::utm(*zone, *north).forward(geographic),
        }
    }

    fn inverse(&self, planar: Coord) -> Result<Coord, GeoError> {
        match self {
            Crs::Geographic => Ok(planar),
            Crs::WebMercator => WebMercator.inverse(planar),
            Crs::Utm { zone, north } => TransverseMercator::utm(*zone, *north).inverse(planar),
        }
    }
}

/// Moves a single coordinate from one reference system to another,
/// passing through geographic coordinates.
pub fn transform(value: Coord, from: Crs, to: Crs) -> Result<Coord, GeoError> {
    if from == to {
        return Ok(value);
    }

    to.forward(from.inverse(value)?)
}
