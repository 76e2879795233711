use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::LonLat;
use crate::error::GeoError;

/// The coordinate reference systems the pipelines move between.
///
/// Geometry is loaded in whatever the source declares, compared in the
/// reference dataset's system, measured in a local UTM zone and handed to
/// geocoders and renderers in [`Crs::Geographic`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Crs {
    /// WGS84 longitude/latitude, EPSG:4326.
    #[default]
    Geographic,
    /// Spherical web mercator, EPSG:3857.
    WebMercator,
    /// WGS84 / UTM, EPSG:326zz (north) or EPSG:327zz (south).
    Utm { zone: u8, north: bool },
}

impl Crs {
    pub fn epsg(&self) -> u32 {
        match self {
            Crs::Geographic => 4326,
            Crs::WebMercator => 3857,
            Crs::Utm { zone, north: true } => 32600 + *zone as u32,
            Crs::Utm { zone, north: false } => 32700 + *zone as u32,
        }
    }

    pub fn from_epsg(code: u32) -> Result<Self, GeoError> {
        match code {
            4326 => Ok(Crs::Geographic),
            3857 | 900913 => Ok(Crs::WebMercator),
            32601..=32660 => Ok(Crs::Utm {
                zone: (code - 32600) as u8,
                north: true,
            }),
            32701..=32760 => Ok(Crs::Utm {
                zone: (code - 32700) as u8,
                north: false,
            }),
            other => Err(GeoError::UnsupportedCrs(format!("EPSG:{other}"))),
        }
    }

    /// The UTM zone whose central meridian is closest to `position`.
    /// Zone exceptions around Norway and Svalbard are not applied.
    pub fn utm_for(position: LonLat) -> Crs {
        let zone = (((position.lon + 180.0) / 6.0).floor() as i32 + 1).clamp(1, 60);

        Crs::Utm {
            zone: zone as u8,
            north: position.lat >= 0.0,
        }
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self, Crs::Geographic)
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

impl FromStr for Crs {
    type Err = GeoError;

    /// Accepts `EPSG:4326`, `epsg:32631`, the OGC URN form
    /// `urn:ogc:def:crs:EPSG::4326` and `urn:ogc:def:crs:OGC:1.3:CRS84`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let upper = trimmed.to_ascii_uppercase();

        if upper.ends_with("CRS84") {
            return Ok(Crs::Geographic);
        }

        let code = upper
            .rsplit(':')
            .next()
            .filter(|_| upper.contains("EPSG"))
            .and_then(|code| code.parse::<u32>().ok())
            .ok_or_else(|| GeoError::UnsupportedCrs(trimmed.to_string()))?;

        Crs::from_epsg(code)
    }
}
