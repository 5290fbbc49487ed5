//! Annotation shape models.
//!
//! All coordinates are given in pixels, except for payloads from legacy
//! server generations, which use coordinates normalized to [0, 1]. Those
//! payloads are rescaled with [`Shape::denormalized`] during conversion.

use serde::{Deserialize, Serialize};

/// A point on a 2D coordinate system, used to define polygons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A shape attached to an annotation or prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Axis-aligned rectangle; `x`/`y` is the top-left corner
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Ellipse described by its bounding box
    Ellipse {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Closed polygon
    Polygon { points: Vec<Point> },
    /// Rectangle rotated by `angle` degrees around its center at `x`/`y`
    RotatedRectangle {
        angle: f64,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl Shape {
    /// Rescale a shape with coordinates in [0, 1] to pixel coordinates.
    pub fn denormalized(&self, image_width: u32, image_height: u32) -> Shape {
        let w = f64::from(image_width);
        let h = f64::from(image_height);
        match self {
            Shape::Rectangle {
                x,
                y,
                width,
                height,
            } => Shape::Rectangle {
                x: x * w,
                y: y * h,
                width: width * w,
                height: height * h,
            },
            Shape::Ellipse {
                x,
                y,
                width,
                height,
            } => Shape::Ellipse {
                x: x * w,
                y: y * h,
                width: width * w,
                height: height * h,
            },
            Shape::Polygon { points } => Shape::Polygon {
                points: points
                    .iter()
                    .map(|p| Point {
                        x: p.x * w,
                        y: p.y * h,
                    })
                    .collect(),
            },
            Shape::RotatedRectangle {
                angle,
                x,
                y,
                width,
                height,
            } => Shape::RotatedRectangle {
                angle: *angle,
                x: x * w,
                y: y * h,
                width: width * w,
                height: height * h,
            },
        }
    }

    /// Axis-aligned bounding box of the shape, as a `Rectangle` variant.
    pub fn to_roi(&self) -> Shape {
        match self {
            Shape::Rectangle { .. } => self.clone(),
            Shape::Ellipse {
                x,
                y,
                width,
                height,
            } => Shape::Rectangle {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
            },
            Shape::Polygon { points } => {
                let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
                let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
                let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
                let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
                Shape::Rectangle {
                    x: min_x,
                    y: min_y,
                    width: max_x - min_x,
                    height: max_y - min_y,
                }
            }
            Shape::RotatedRectangle {
                angle,
                x,
                y,
                width,
                height,
            } => {
                let radians = angle.to_radians();
                let half_span_x =
                    0.5 * width * radians.cos().abs() + 0.5 * height * radians.sin().abs();
                let half_span_y =
                    0.5 * width * radians.sin().abs() + 0.5 * height * radians.cos().abs();
                Shape::Rectangle {
                    x: x - half_span_x,
                    y: y - half_span_y,
                    width: 2.0 * half_span_x,
                    height: 2.0 * half_span_y,
                }
            }
        }
    }

    /// Area of the shape, in pixels.
    pub fn area(&self) -> f64 {
        match self {
            Shape::Rectangle { width, height, .. } => width * height,
            Shape::Ellipse { width, height, .. } => {
                std::f64::consts::PI * width * height / 4.0
            }
            Shape::Polygon { points } => {
                // Shoelace formula
                let mut doubled = 0.0;
                for (i, p) in points.iter().enumerate() {
                    let q = &points[(i + 1) % points.len()];
                    doubled += p.x * q.y - q.x * p.y;
                }
                doubled.abs() / 2.0
            }
            Shape::RotatedRectangle { width, height, .. } => width * height,
        }
    }
}
