use super::*;

#[test]
fn circle_hole_is_centered_with_half_of_the_larger_padded_side() {
    let expanded = expand(PixelRect::new(100, 100, 140, 140), 8.0);
    assert_eq!(expanded, Rect::new(92.0, 92.0, 148.0, 148.0));

    let outline = HoleOutline::new(HighlightShape::Circle, expanded, 4.0);
    assert_eq!(
        outline,
        HoleOutline::Circle {
            center: Point::new(120.0, 120.0),
            radius: 28.0
        }
    );
}

#[test]
fn circle_radius_uses_the_longer_side_of_wide_targets() {
    let expanded = expand(PixelRect::new(0, 0, 100, 20), 0.0);
    let HoleOutline::Circle { center, radius } =
        HoleOutline::new(HighlightShape::Circle, expanded, 0.0)
    else {
        panic!("expected circle");
    };
    assert_eq!(center, Point::new(50.0, 10.0));
    assert_eq!(radius, 50.0);
}

#[test]
fn rect_and_rounded_rect_keep_the_padded_rect() {
    let expanded = expand(PixelRect::new(10, 20, 30, 40), 2.0);
    assert_eq!(
        HoleOutline::new(HighlightShape::Rect, expanded, 6.0),
        HoleOutline::Rect(Rect::new(8.0, 18.0, 32.0, 42.0))
    );
    assert_eq!(
        HoleOutline::new(HighlightShape::RoundedRect, expanded, 6.0),
        HoleOutline::RoundedRect {
            rect: Rect::new(8.0, 18.0, 32.0, 42.0),
            radius: 6.0
        }
    );
}

#[test]
fn outline_paths_bound_the_hole() {
    let outline = HoleOutline::Circle {
        center: Point::new(50.0, 50.0),
        radius: 10.0,
    };
    let bbox = outline.to_path().bounding_box();
    assert!((bbox.x0 - 40.0).abs() < 0.5 && (bbox.x1 - 60.0).abs() < 0.5);
    assert!((bbox.y0 - 40.0).abs() < 0.5 && (bbox.y1 - 60.0).abs() < 0.5);
}

#[test]
fn stroke_outline_widens_a_line() {
    let line = line_path(Point::new(0.0, 10.0), Point::new(100.0, 10.0));
    let solid = stroke_outline(&line, 4.0, false).bounding_box();
    assert!((solid.y0 - 8.0).abs() < 0.5 && (solid.y1 - 12.0).abs() < 0.5);
    assert!(solid.x0 <= 0.5 && solid.x1 >= 99.5);

    let dashed = stroke_outline(&line, 4.0, true);
    let subpaths = dashed
        .elements()
        .iter()
        .filter(|el| matches!(el, PathEl::MoveTo(_)))
        .count();
    assert!(subpaths >= 6, "dashes should split the line, got {subpaths} subpaths");
}
