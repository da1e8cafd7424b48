//! Spatial value types

use std::fmt;

/// Default SRID for geography values (WGS 84).
pub const GEOGRAPHY_DEFAULT_SRID: u32 = 4326;

/// Default SRID for geometry values.
pub const GEOMETRY_DEFAULT_SRID: u32 = 0;

/// A single coordinate pair (x/longitude, y/latitude).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// X coordinate (longitude for geography).
    pub x: f64,
    /// Y coordinate (latitude for geography).
    pub y: f64,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// The shape part of a spatial value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A single point.
    Point(Position),
    /// An open or closed line.
    LineString(Vec<Position>),
    /// A polygon made of one outer ring and optional inner rings.
    Polygon(Vec<Vec<Position>>),
}

/// A spatial value with its coordinate reference system.
///
/// # Example
///
/// ```
/// use odata_metadata::model::types::{Position, Spatial};
///
/// let point = Spatial::point(Position::new(-122.1, 47.6));
/// assert_eq!(point.to_well_known_text(), "SRID=4326;POINT(-122.1 47.6)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Spatial {
    /// Spatial reference system identifier.
    pub srid: u32,
    /// The shape.
    pub shape: Shape,
}

impl Spatial {
    /// Creates a geography point with the default SRID.
    pub fn point(position: Position) -> Self {
        Self {
            srid: GEOGRAPHY_DEFAULT_SRID,
            shape: Shape::Point(position),
        }
    }

    /// Creates a line string with the default geography SRID.
    pub fn line_string(points: Vec<Position>) -> Self {
        Self {
            srid: GEOGRAPHY_DEFAULT_SRID,
            shape: Shape::LineString(points),
        }
    }

    /// Creates a polygon with the default geography SRID.
    pub fn polygon(rings: Vec<Vec<Position>>) -> Self {
        Self {
            srid: GEOGRAPHY_DEFAULT_SRID,
            shape: Shape::Polygon(rings),
        }
    }

    /// Sets the SRID.
    pub fn with_srid(mut self, srid: u32) -> Self {
        self.srid = srid;
        self
    }

    /// Renders the value as extended well-known text (`SRID=n;WKT`).
    pub fn to_well_known_text(&self) -> String {
        let body = match &self.shape {
            Shape::Point(p) => format!("POINT({})", p),
            Shape::LineString(points) => format!("LINESTRING({})", join_positions(points)),
            Shape::Polygon(rings) => {
                let rings: Vec<String> = rings
                    .iter()
                    .map(|ring| format!("({})", join_positions(ring)))
                    .collect();
                format!("POLYGON({})", rings.join(","))
            }
        };
        format!("SRID={};{}", self.srid, body)
    }
}

fn join_positions(points: &[Position]) -> String {
    points
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
