//! Freehand doodle lines.

use super::{EntityId, SerializableColor, WallEntity};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand line drawn on the wall (series of sample points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoodleLine {
    pub(crate) id: EntityId,
    /// Sample points in drawing order.
    pub points: Vec<Point>,
    /// Stroke color.
    pub color: SerializableColor,
    /// Stroke width.
    pub width: f64,
}

impl DoodleLine {
    /// Start a new line at a single point.
    pub fn new(start: Point, color: SerializableColor, width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![start],
            color,
            width,
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, color: SerializableColor, width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            width,
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether any sample point lies strictly within `radius` of `point`.
    ///
    /// Only the samples are brushd, not the segments between them.
    pub fn is_near(&self, point: Point, radius: f64) -> bool {
        self.points.iter().any(|p| p.distance(point) < radius)
    }

    /// Polyline path for rendering.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        let Some(first) = self.points.first() else {
            return path;
        };

        path.move_to(*first);
        for point in self.points.iter().skip(1) {
            path.line_to(*point);
        }

        path
    }
}

impl WallEntity for DoodleLine {
    fn id(&self) -> EntityId {
        self.id
    }

    fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.is_near(point, tolerance + self.width / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(f64, f64)]) -> DoodleLine {
        DoodleLine::from_points(
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            SerializableColor::black(),
            4.0,
        )
    }

    #[test]
    fn test_new_line_has_start_point() {
        let doodle = DoodleLine::new(Point::new(3.0, 4.0), SerializableColor::amber(), 4.0);
        assert_eq!(doodle.len(), 1);
        assert_eq!(doodle.points[0], Point::new(3.0, 4.0));
    }

    #[test]
    fn test_bounds() {
        let doodle = line(&[(0.0, 0.0), (100.0, 50.0), (50.0, 100.0)]);

        let bounds = doodle.bounds();
        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_near_brushs_samples_only() {
        let doodle = line(&[(0.0, 0.0), (200.0, 0.0)]);

        assert!(doodle.is_near(Point::new(10.0, 10.0), 30.0));
        // Midpoint of the segment is far from both samples.
        assert!(!doodle.is_near(Point::new(100.0, 0.0), 30.0));
    }

    #[test]
    fn test_is_near_boundary_is_exclusive() {
        let doodle = line(&[(0.0, 0.0)]);
        assert!(!doodle.is_near(Point::new(30.0, 0.0), 30.0));
        assert!(doodle.is_near(Point::new(29.9, 0.0), 30.0));
    }

    #[test]
    fn test_to_path_empty() {
        let doodle = line(&[]);
        assert!(doodle.to_path().elements().is_empty());
    }
}
