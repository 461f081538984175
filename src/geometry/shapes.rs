use crate::geometry::{GeometryError, Transformable};
use crate::util::colour::Colour;
use crate::util::linalg::Vector2;
use itertools::Itertools;

/// Visual styling for a shape: stroke/fill colours and stroke width.
///
/// Styles ride along unchanged through any transform.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    pub fill: Option<Colour>,
    pub stroke: Option<Colour>,
    pub stroke_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Colour::white()),
            stroke: Some(Colour::black()),
            stroke_width: 1.0,
        }
    }
}

impl Style {
    #[must_use]
    pub fn with_fill(mut self, fill: Colour) -> Self {
        self.fill = Some(fill);
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Colour) -> Self {
        self.stroke = Some(stroke);
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }
}

/// A single styled point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: Vector2,
    pub style: Style,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Vector2::new(x, y),
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Transformable for Point {
    fn to_points(&self) -> Vec<Vector2> {
        vec![self.position]
    }

    fn from_points(&self, points: Vec<Vector2>) -> Result<Self, GeometryError> {
        match points.as_slice() {
            [position] => Ok(Self {
                position: *position,
                style: self.style,
            }),
            other => Err(GeometryError::VertexCountMismatch {
                expected: 1,
                actual: other.len(),
            }),
        }
    }
}

/// A line segment between two ordered vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    vertices: [Vector2; 2],
    pub style: Style,
}

impl Line {
    pub fn new(start: Vector2, end: Vector2) -> Self {
        Self {
            vertices: [start, end],
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn start(&self) -> Vector2 {
        self.vertices[0]
    }

    pub fn end(&self) -> Vector2 {
        self.vertices[1]
    }
}

impl Transformable for Line {
    fn to_points(&self) -> Vec<Vector2> {
        self.vertices.to_vec()
    }

    fn from_points(&self, points: Vec<Vector2>) -> Result<Self, GeometryError> {
        let actual = points.len();
        let (start, end) =
            points
                .into_iter()
                .collect_tuple()
                .ok_or(GeometryError::VertexCountMismatch {
                    expected: 2,
                    actual,
                })?;
        Ok(Self {
            vertices: [start, end],
            style: self.style,
        })
    }
}

/// A polygon with an ordered vertex list; insertion order is drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vector2>,
    pub style: Style,
}

impl Polygon {
    pub fn new(vertices: Vec<Vector2>) -> Self {
        Self {
            vertices,
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Appends a vertex, preserving drawing order.
    #[must_use]
    pub fn with_vertex(mut self, vertex: Vector2) -> Self {
        self.vertices.push(vertex);
        self
    }

    pub fn vertices(&self) -> &[Vector2] {
        &self.vertices
    }
}

impl Transformable for Polygon {
    fn to_points(&self) -> Vec<Vector2> {
        self.vertices.clone()
    }

    fn from_points(&self, points: Vec<Vector2>) -> Result<Self, GeometryError> {
        if points.len() != self.vertices.len() {
            return Err(GeometryError::VertexCountMismatch {
                expected: self.vertices.len(),
                actual: points.len(),
            });
        }
        Ok(Self {
            vertices: points,
            style: self.style,
        })
    }
}

/// A quadrilateral stored purely as its 4 ordered vertices.
///
/// Built axis-aligned from an origin and an extent, but nothing beyond the
/// vertex list is stored: all corner accessors derive from the vertices, so
/// a skew-producing transform yields 4 transformed vertices rather than a
/// re-fitted axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    vertices: [Vector2; 4],
    pub style: Style,
}

impl Rect {
    /// Builds from the bottom-left corner and a `(width, height)` extent,
    /// winding counterclockwise.
    pub fn new(origin: Vector2, extent: Vector2) -> Self {
        let Vector2 { x, y } = origin;
        let Vector2 {
            x: width,
            y: height,
        } = extent;
        Self {
            vertices: [
                Vector2::new(x, y),
                Vector2::new(x + width, y),
                Vector2::new(x + width, y + height),
                Vector2::new(x, y + height),
            ],
            style: Style::default(),
        }
    }

    /// A `width × height` rect centred on the local origin; the usual
    /// authoring position for rig parts that rotate in place.
    pub fn centred(width: f64, height: f64) -> Self {
        Self::new(
            Vector2::new(-width / 2.0, -height / 2.0),
            Vector2::new(width, height),
        )
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn origin(&self) -> Vector2 {
        self.bottom_left()
    }

    /// Diagonal from the bottom-left to the top-right corner.
    pub fn extent(&self) -> Vector2 {
        self.top_right() - self.bottom_left()
    }

    pub fn bottom_left(&self) -> Vector2 {
        self.vertices[0]
    }

    pub fn bottom_right(&self) -> Vector2 {
        self.vertices[1]
    }

    pub fn top_right(&self) -> Vector2 {
        self.vertices[2]
    }

    pub fn top_left(&self) -> Vector2 {
        self.vertices[3]
    }
}

impl Transformable for Rect {
    fn to_points(&self) -> Vec<Vector2> {
        self.vertices.to_vec()
    }

    fn from_points(&self, points: Vec<Vector2>) -> Result<Self, GeometryError> {
        let actual = points.len();
        let (a, b, c, d) =
            points
                .into_iter()
                .collect_tuple()
                .ok_or(GeometryError::VertexCountMismatch {
                    expected: 4,
                    actual,
                })?;
        Ok(Self {
            vertices: [a, b, c, d],
            style: self.style,
        })
    }
}

/// The closed set of drawable shapes.
///
/// The drawing adapter consumes these via [`vertices()`](Shape::vertices)
/// and [`style()`](Shape::style); transform application delegates to each
/// variant's [`Transformable`] impl.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(Point),
    Line(Line),
    Polygon(Polygon),
    Rect(Rect),
}

impl Shape {
    /// The shape's ordered vertex list, in whatever coordinate space the
    /// shape currently lives in.
    pub fn vertices(&self) -> Vec<Vector2> {
        self.to_points()
    }

    pub fn style(&self) -> &Style {
        match self {
            Shape::Point(point) => &point.style,
            Shape::Line(line) => &line.style,
            Shape::Polygon(polygon) => &polygon.style,
            Shape::Rect(rect) => &rect.style,
        }
    }
}

impl Transformable for Shape {
    fn to_points(&self) -> Vec<Vector2> {
        match self {
            Shape::Point(point) => point.to_points(),
            Shape::Line(line) => line.to_points(),
            Shape::Polygon(polygon) => polygon.to_points(),
            Shape::Rect(rect) => rect.to_points(),
        }
    }

    fn from_points(&self, points: Vec<Vector2>) -> Result<Self, GeometryError> {
        Ok(match self {
            Shape::Point(point) => Shape::Point(point.from_points(points)?),
            Shape::Line(line) => Shape::Line(line.from_points(points)?),
            Shape::Polygon(polygon) => Shape::Polygon(polygon.from_points(points)?),
            Shape::Rect(rect) => Shape::Rect(rect.from_points(points)?),
        })
    }
}

impl From<Point> for Shape {
    fn from(value: Point) -> Self {
        Shape::Point(value)
    }
}
impl From<Line> for Shape {
    fn from(value: Line) -> Self {
        Shape::Line(value)
    }
}
impl From<Polygon> for Shape {
    fn from(value: Polygon) -> Self {
        Shape::Polygon(value)
    }
}
impl From<Rect> for Shape {
    fn from(value: Rect) -> Self {
        Shape::Rect(value)
    }
}
