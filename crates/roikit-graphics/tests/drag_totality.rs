//! Property tests: drag application is total
//! Any cursor position and modifier combination must produce finite
//! committed geometry, with no panics and no NaN

use proptest::prelude::*;
use roikit_core::{Calibration, CanvasMapping, Point, Rect};
use roikit_graphics::{DragSession, Graphic, HitPart, Modifiers, Shape};

fn mapping() -> CanvasMapping {
    CanvasMapping::new(
        (1000, 1000),
        Rect::new(0.0, 0.0, 1000.0, 1000.0),
        Calibration::default(),
        Calibration::default(),
    )
}

fn modifiers(shift: bool, alt: bool) -> Modifiers {
    Modifiers {
        shift,
        alt,
        control: false,
    }
}

fn assert_finite(v: f64) -> Result<(), TestCaseError> {
    prop_assert!(v.is_finite());
    Ok(())
}

proptest! {
    #[test]
    fn rect_corner_drags_stay_finite(
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
        shift in any::<bool>(),
        alt in any::<bool>(),
        constrained in any::<bool>(),
    ) {
        let m = mapping();
        let mut g = Graphic::from_kind("rect-graphic").unwrap();
        g.is_bounds_constrained = constrained;
        let session = DragSession::with_part(&g, HitPart::BottomRight, Point::new(750.0, 750.0));
        session.update(&mut g, &m, Point::new(x, y), modifiers(shift, alt));
        if let Shape::Rectangle(r) = &g.shape {
            assert_finite(r.bounds.left())?;
            assert_finite(r.bounds.top())?;
            assert_finite(r.bounds.width())?;
            assert_finite(r.bounds.height())?;
            prop_assert!(r.bounds.width() >= 0.0);
            prop_assert!(r.bounds.height() >= 0.0);
            if constrained {
                prop_assert!(r.bounds.left() >= -1e-9);
                prop_assert!(r.bounds.right() <= 1.0 + 1e-9);
            }
        } else {
            prop_assert!(false, "shape kind changed during drag");
        }
    }

    #[test]
    fn line_endpoint_drags_stay_finite(
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
        shift in any::<bool>(),
        alt in any::<bool>(),
    ) {
        let m = mapping();
        let mut g = Graphic::from_kind("line-graphic").unwrap();
        let session = DragSession::with_part(&g, HitPart::End, Point::new(750.0, 750.0));
        session.update(&mut g, &m, Point::new(x, y), modifiers(shift, alt));
        if let Shape::Line(l) = &g.shape {
            assert_finite(l.start.x)?;
            assert_finite(l.start.y)?;
            assert_finite(l.end.x)?;
            assert_finite(l.end.y)?;
        } else {
            prop_assert!(false, "shape kind changed during drag");
        }
    }

    #[test]
    fn wedge_drags_keep_angles_normalized(
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
        shift in any::<bool>(),
    ) {
        let m = mapping();
        let mut g = Graphic::from_kind("wedge-graphic").unwrap();
        let session = DragSession::with_part(&g, HitPart::EndAngle, Point::new(100.0, 500.0));
        session.update(&mut g, &m, Point::new(x, y), modifiers(shift, false));
        if let Shape::Wedge(w) = &g.shape {
            prop_assert!(w.end_angle.is_finite());
            prop_assert!((0.0..std::f64::consts::TAU + 1e-9).contains(&w.end_angle));
        } else {
            prop_assert!(false, "shape kind changed during drag");
        }
    }

    #[test]
    fn masks_stay_within_unit_weights(
        r1 in 0.0f64..1.0,
        r2 in 0.0f64..1.0,
    ) {
        let mut g = Graphic::from_kind("ring-graphic").unwrap();
        if let Shape::Ring(ring) = &mut g.shape {
            ring.radius_1 = r1;
            ring.radius_2 = r2;
        }
        let mask = g.mask(16, 16, None);
        prop_assert!(mask.data().iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
