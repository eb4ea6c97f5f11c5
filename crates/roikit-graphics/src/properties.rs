//! Named-property access for inspector panels and persistence.
//!
//! Every graphic exposes a flat table of named properties: the common
//! fields plus the variant's geometry fields. The tables are explicit per
//! kind; there is no reflection. Reads of unknown names return `None`;
//! writes of unknown names or mis-typed values fail with a typed error and
//! leave the graphic unchanged.

use roikit_core::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::error::{GraphicError, Result};
use crate::graphic::{Graphic, RingMode, Shape};

/// A property value crossing the externalization boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Point { x: f64, y: f64 },
    Size { width: f64, height: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
}

impl PropertyValue {
    pub fn point(p: Point) -> PropertyValue {
        PropertyValue::Point { x: p.x, y: p.y }
    }

    pub fn rect(r: Rect) -> PropertyValue {
        PropertyValue::Rect {
            x: r.left(),
            y: r.top(),
            width: r.width(),
            height: r.height(),
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(v) => Some(v),
            _ => None,
        }
    }

    fn as_point(&self) -> Option<Point> {
        match self {
            PropertyValue::Point { x, y } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }

    fn as_rect(&self) -> Option<Rect> {
        match self {
            PropertyValue::Rect {
                x,
                y,
                width,
                height,
            } => Some(Rect::new(*x, *y, *width, *height)),
            _ => None,
        }
    }
}

const COMMON_PROPERTIES: [&str; 4] = [
    "label",
    "is_position_locked",
    "is_shape_locked",
    "is_bounds_constrained",
];

fn number(name: &str, value: &PropertyValue) -> Result<f64> {
    value.as_number().ok_or_else(|| GraphicError::PropertyType {
        name: name.to_string(),
        expected: "number",
    })
}

fn point(name: &str, value: &PropertyValue) -> Result<Point> {
    value.as_point().ok_or_else(|| GraphicError::PropertyType {
        name: name.to_string(),
        expected: "point",
    })
}

fn rect(name: &str, value: &PropertyValue) -> Result<Rect> {
    let r = value.as_rect().ok_or_else(|| GraphicError::PropertyType {
        name: name.to_string(),
        expected: "rect",
    })?;
    // committed bounds always carry a non-negative size
    Ok(Rect {
        origin: r.origin,
        size: Size::new(r.width().max(0.0), r.height().max(0.0)),
    })
}

impl Graphic {
    /// The property names this graphic exposes, common fields first.
    pub fn property_names(&self) -> Vec<&'static str> {
        let mut names = COMMON_PROPERTIES.to_vec();
        names.extend(match &self.shape {
            Shape::Point(_) => vec!["position"],
            Shape::Line(_) => vec!["start", "end"],
            Shape::Rectangle(_) | Shape::Ellipse(_) => vec!["bounds", "rotation"],
            Shape::Interval(_) => vec!["start", "end"],
            Shape::Channel(_) => vec!["position"],
            Shape::Spot(_) => vec!["bounds"],
            Shape::Wedge(_) => vec!["start_angle", "end_angle"],
            Shape::Ring(_) => vec!["radius_1", "radius_2", "mode"],
            Shape::Lattice(_) => vec!["u_pos", "v_pos", "radius"],
        });
        names
    }

    /// Reads a property by name. Unknown names return `None`.
    pub fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "label" => {
                return Some(PropertyValue::Text(
                    self.label.clone().unwrap_or_default(),
                ))
            }
            "is_position_locked" => return Some(PropertyValue::Bool(self.is_position_locked)),
            "is_shape_locked" => return Some(PropertyValue::Bool(self.is_shape_locked)),
            "is_bounds_constrained" => {
                return Some(PropertyValue::Bool(self.is_bounds_constrained))
            }
            _ => {}
        }
        match (&self.shape, name) {
            (Shape::Point(s), "position") => Some(PropertyValue::point(s.position)),
            (Shape::Line(s), "start") => Some(PropertyValue::point(s.start)),
            (Shape::Line(s), "end") => Some(PropertyValue::point(s.end)),
            (Shape::Rectangle(s), "bounds") => Some(PropertyValue::rect(s.bounds)),
            (Shape::Rectangle(s), "rotation") => Some(PropertyValue::Number(s.rotation)),
            (Shape::Ellipse(s), "bounds") => Some(PropertyValue::rect(s.bounds)),
            (Shape::Ellipse(s), "rotation") => Some(PropertyValue::Number(s.rotation)),
            (Shape::Interval(s), "start") => Some(PropertyValue::Number(s.start)),
            (Shape::Interval(s), "end") => Some(PropertyValue::Number(s.end)),
            (Shape::Channel(s), "position") => Some(PropertyValue::Number(s.position)),
            (Shape::Spot(s), "bounds") => Some(PropertyValue::rect(s.bounds)),
            (Shape::Wedge(s), "start_angle") => Some(PropertyValue::Number(s.start_angle)),
            (Shape::Wedge(s), "end_angle") => Some(PropertyValue::Number(s.end_angle)),
            (Shape::Ring(s), "radius_1") => Some(PropertyValue::Number(s.radius_1)),
            (Shape::Ring(s), "radius_2") => Some(PropertyValue::Number(s.radius_2)),
            (Shape::Ring(s), "mode") => Some(PropertyValue::Text(s.mode.to_string())),
            (Shape::Lattice(s), "u_pos") => Some(PropertyValue::point(s.u_pos)),
            (Shape::Lattice(s), "v_pos") => Some(PropertyValue::point(s.v_pos)),
            (Shape::Lattice(s), "radius") => Some(PropertyValue::Number(s.radius)),
            _ => None,
        }
    }

    /// Writes a property by name. Unknown names and mis-typed values are
    /// rejected with a typed error; the graphic is unchanged on failure.
    pub fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<()> {
        match name {
            "label" => {
                let text = value.as_text().ok_or_else(|| GraphicError::PropertyType {
                    name: name.to_string(),
                    expected: "text",
                })?;
                self.label = if text.is_empty() {
                    None
                } else {
                    Some(text.to_string())
                };
                return Ok(());
            }
            "is_position_locked" | "is_shape_locked" | "is_bounds_constrained" => {
                let flag = value.as_bool().ok_or_else(|| GraphicError::PropertyType {
                    name: name.to_string(),
                    expected: "bool",
                })?;
                match name {
                    "is_position_locked" => self.is_position_locked = flag,
                    "is_shape_locked" => self.is_shape_locked = flag,
                    _ => self.is_bounds_constrained = flag,
                }
                return Ok(());
            }
            _ => {}
        }
        match (&mut self.shape, name) {
            (Shape::Point(s), "position") => s.position = point(name, &value)?,
            (Shape::Line(s), "start") => s.start = point(name, &value)?,
            (Shape::Line(s), "end") => s.end = point(name, &value)?,
            (Shape::Rectangle(s), "bounds") => s.bounds = rect(name, &value)?,
            (Shape::Rectangle(s), "rotation") => s.rotation = number(name, &value)?,
            (Shape::Ellipse(s), "bounds") => s.bounds = rect(name, &value)?,
            (Shape::Ellipse(s), "rotation") => s.rotation = number(name, &value)?,
            (Shape::Interval(s), "start") => s.start = number(name, &value)?,
            (Shape::Interval(s), "end") => s.end = number(name, &value)?,
            (Shape::Channel(s), "position") => s.position = number(name, &value)?,
            (Shape::Spot(s), "bounds") => s.bounds = rect(name, &value)?,
            (Shape::Wedge(s), "start_angle") => s.start_angle = number(name, &value)?,
            (Shape::Wedge(s), "end_angle") => s.end_angle = number(name, &value)?,
            (Shape::Ring(s), "radius_1") => s.radius_1 = number(name, &value)?,
            (Shape::Ring(s), "radius_2") => s.radius_2 = number(name, &value)?,
            (Shape::Ring(s), "mode") => {
                let text = value.as_text().ok_or_else(|| GraphicError::PropertyType {
                    name: name.to_string(),
                    expected: "text",
                })?;
                s.mode = text.parse::<RingMode>()?;
            }
            (Shape::Lattice(s), "u_pos") => s.u_pos = point(name, &value)?,
            (Shape::Lattice(s), "v_pos") => s.v_pos = point(name, &value)?,
            (Shape::Lattice(s), "radius") => s.radius = number(name, &value)?,
            _ => {
                return Err(GraphicError::UnknownProperty {
                    kind: self.kind().as_str(),
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Snapshot of all properties, in [`Graphic::property_names`] order.
    pub fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        self.property_names()
            .into_iter()
            .filter_map(|name| self.get_property(name).map(|v| (name, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphic::GraphicKind;

    #[test]
    fn unknown_property_write_is_rejected_and_harmless() {
        let mut g = Graphic::from_kind("rect-graphic").unwrap();
        let before = g.shape.clone();
        let err = g
            .set_property("radius", PropertyValue::Number(0.2))
            .unwrap_err();
        assert_eq!(
            err,
            GraphicError::UnknownProperty {
                kind: "rect-graphic",
                name: "radius".to_string(),
            }
        );
        assert_eq!(g.shape, before);
    }

    #[test]
    fn type_mismatch_is_rejected_and_harmless() {
        let mut g = Graphic::from_kind("ellipse-graphic").unwrap();
        let before = g.shape.clone();
        let err = g
            .set_property("bounds", PropertyValue::Number(1.0))
            .unwrap_err();
        assert!(matches!(err, GraphicError::PropertyType { .. }));
        assert_eq!(g.shape, before);
    }

    #[test]
    fn ring_mode_round_trips_as_text() {
        let mut g = Graphic::from_kind("ring-graphic").unwrap();
        g.set_property("mode", PropertyValue::Text("low-pass".to_string()))
            .unwrap();
        assert_eq!(
            g.get_property("mode"),
            Some(PropertyValue::Text("low-pass".to_string()))
        );
        assert!(g
            .set_property("mode", PropertyValue::Text("notch".to_string()))
            .is_err());
    }

    #[test]
    fn every_kind_lists_readable_properties() {
        for kind in GraphicKind::all() {
            let g = Graphic::from_kind(kind.as_str()).unwrap();
            for name in g.property_names() {
                assert!(g.get_property(name).is_some(), "{kind}: {name}");
            }
        }
    }

    #[test]
    fn negative_bounds_size_is_normalized_on_write() {
        let mut g = Graphic::from_kind("rect-graphic").unwrap();
        g.set_property(
            "bounds",
            PropertyValue::Rect {
                x: 0.2,
                y: 0.2,
                width: -0.5,
                height: 0.3,
            },
        )
        .unwrap();
        match g.get_property("bounds") {
            Some(PropertyValue::Rect { width, .. }) => assert_eq!(width, 0.0),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
