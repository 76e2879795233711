use geo::{Centroid, Coord, Distance, Euclidean, Line, LineString, Point};

use crate::error::GeoError;

/// A single-part line of at least two finite coordinates.
///
/// The coordinate reference system is carried by the owning
/// [`GeometrySet`](crate::GeometrySet), never by the line itself.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry(LineString<f64>);

impl LineGeometry {
    pub fn new(line: LineString<f64>) -> Result<Self, GeoError> {
        if line.0.len() < 2 {
            return Err(GeoError::TooFewCoordinates(line.0.len()));
        }

        if line.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(GeoError::NonFinite);
        }

        Ok(LineGeometry(line))
    }

    pub fn from_coords(coords: impl IntoIterator<Item = Coord>) -> Result<Self, GeoError> {
        Self::new(coords.into_iter().collect::<LineString>())
    }

    pub fn line_string(&self) -> &LineString<f64> {
        &self.0
    }

    pub fn coords(&self) -> impl Iterator<Item = &Coord> {
        self.0.coords()
    }

    pub fn len(&self) -> usize {
        self.0.0.len()
    }

    /// Always false, a line holds at least two coordinates.
    pub fn is_empty(&self) -> bool {
        self.0.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = Line<f64>> + '_ {
        self.0.lines()
    }

    /// Produces a new line with every coordinate passed through `f`.
    pub fn try_map_coords<F>(&self, mut f: F) -> Result<Self, GeoError>
    where
        F: FnMut(Coord) -> Result<Coord, GeoError>,
    {
        let coords = self
            .0
            .coords()
            .map(|c| f(*c))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_coords(coords)
    }

    /// Length in the units of the coordinate space.
    /// Metres when the owning set is in a planar metric system.
    pub fn planar_length(&self) -> f64 {
        self.segments()
            .map(|segment| Euclidean.distance(segment.start_point(), segment.end_point()))
            .sum()
    }

    /// Length-weighted centroid of the line.
    pub fn centroid(&self) -> Option<Point<f64>> {
        self.0.centroid()
    }
}

impl TryFrom<LineString<f64>> for LineGeometry {
    type Error = GeoError;

    fn try_from(value: LineString<f64>) -> Result<Self, Self::Error> {
        LineGeometry::new(value)
    }
}

impl From<LineGeometry> for LineString<f64> {
    fn from(value: LineGeometry) -> Self {
        value.0
    }
}

/// The geometry of one record: a line, or several disconnected line parts
/// stored under the same record.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(LineGeometry),
    MultiLine(Vec<LineGeometry>),

    /// A record kept without geometry, written out as a null geometry.
    Empty,
}

impl Shape {
    pub fn parts(&self) -> &[LineGeometry] {
        match self {
            Shape::Line(line) => std::slice::from_ref(line),
            Shape::MultiLine(parts) => parts,
            Shape::Empty => &[],
        }
    }

    pub fn part_count(&self) -> usize {
        self.parts().len()
    }

    pub fn is_single_part(&self) -> bool {
        matches!(self, Shape::Line(_))
    }

    pub fn try_map_coords<F>(&self, mut f: F) -> Result<Self, GeoError>
    where
        F: FnMut(Coord) -> Result<Coord, GeoError>,
    {
        Ok(match self {
            Shape::Line(line) => Shape::Line(line.try_map_coords(&mut f)?),
            Shape::MultiLine(parts) => Shape::MultiLine(
                parts
                    .iter()
                    .map(|part| part.try_map_coords(&mut f))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Shape::Empty => Shape::Empty,
        })
    }

    pub fn planar_length(&self) -> f64 {
        self.parts().iter().map(LineGeometry::planar_length).sum()
    }

    /// Centroid of all parts, weighted by part length.
    pub fn centroid(&self) -> Option<Point<f64>> {
        match self {
            Shape::Line(line) => line.centroid(),
            Shape::MultiLine(parts) => parts
                .iter()
                .map(|part| part.line_string().clone())
                .collect::<geo::MultiLineString>()
                .centroid(),
            Shape::Empty => None,
        }
    }
}

impl From<LineGeometry> for Shape {
    fn from(value: LineGeometry) -> Self {
        Shape::Line(value)
    }
}
