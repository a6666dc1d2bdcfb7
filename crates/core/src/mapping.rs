//! Mapping between the stretched palette display and the original bitmap.
//!
//! The palette is drawn stretched to fill its drawing area, so the same
//! bitmap pixel covers `displayed / original` widget pixels on each axis.
//! Display coordinates are floating point widget coordinates, original
//! coordinates are integer bitmap pixels.

use palette_picker_types::{Point, Position, Size};

/// Map a display position to the bitmap pixel under it.
///
/// Returns `None` when either size is empty. The result may still lie
/// outside the bitmap, see [`is_valid`].
pub fn to_original(position: Position, original: Size, displayed: Size) -> Option<Point> {
    if original.is_empty() || displayed.is_empty() {
        return None;
    }

    let x = (position.x * original.width as f64 / displayed.width as f64).floor();
    let y = (position.y * original.height as f64 / displayed.height as f64).floor();
    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    Some(Point::new(x as i32, y as i32))
}

/// True when `point` addresses a pixel of a bitmap of `size`
pub fn is_valid(point: Point, size: Size) -> bool {
    point.x >= 0 && point.y >= 0 && point.x < size.width && point.y < size.height
}

/// Map a display position to a bitmap pixel, rejecting anything off the bitmap
pub fn pick_point(position: Position, original: Size, displayed: Size) -> Option<Point> {
    to_original(position, original, displayed).filter(|point| is_valid(*point, original))
}

/// Display position of the centre of a bitmap pixel
pub fn to_display(point: Point, original: Size, displayed: Size) -> Position {
    if original.is_empty() {
        return Position::default();
    }

    Position::new(
        (point.x as f64 + 0.5) * displayed.width as f64 / original.width as f64,
        (point.y as f64 + 0.5) * displayed.height as f64 / original.height as f64,
    )
}

/// Keep a display position on the same image location after a resize
pub fn rescale(position: Position, from: Size, to: Size) -> Position {
    if from.is_empty() {
        return position;
    }

    Position::new(
        position.x * to.width as f64 / from.width as f64,
        position.y * to.height as f64 / from.height as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: [(Size, Size); 5] = [
        (Size::new(256, 256), Size::new(315, 202)),
        (Size::new(100, 50), Size::new(100, 50)),
        (Size::new(3, 3), Size::new(5, 7)),
        (Size::new(640, 480), Size::new(64, 48)),
        (Size::new(7, 300), Size::new(315, 202)),
    ];

    #[test]
    fn test_identity_mapping() {
        let size = Size::new(10, 10);
        assert_eq!(
            to_original(Position::new(3.2, 7.9), size, size),
            Some(Point::new(3, 7))
        );
    }

    #[test]
    fn test_stretched_mapping() {
        let original = Size::new(100, 100);
        let displayed = Size::new(200, 50);
        assert_eq!(
            to_original(Position::new(199.0, 49.0), original, displayed),
            Some(Point::new(99, 98))
        );
        assert_eq!(
            to_original(Position::new(0.0, 0.0), original, displayed),
            Some(Point::new(0, 0))
        );
    }

    #[test]
    fn test_original_to_display_round_trip_is_exact() {
        for (original, displayed) in SIZES {
            for y in 0..original.height {
                for x in 0..original.width {
                    let point = Point::new(x, y);
                    let shown = to_display(point, original, displayed);
                    assert_eq!(
                        to_original(shown, original, displayed),
                        Some(point),
                        "{:?} via {:?} ({:?} -> {:?})",
                        point,
                        shown,
                        original,
                        displayed
                    );
                }
            }
        }
    }

    #[test]
    fn test_display_to_original_round_trip_within_one_pixel_span() {
        for (original, displayed) in SIZES {
            let half_span_x = displayed.width as f64 / original.width as f64 / 2.0;
            let half_span_y = displayed.height as f64 / original.height as f64 / 2.0;

            for dy in 0..displayed.height {
                for dx in 0..displayed.width {
                    let position = Position::new(dx as f64 + 0.5, dy as f64 + 0.5);
                    let point = pick_point(position, original, displayed)
                        .expect("every display pixel maps inside the bitmap");
                    let back = to_display(point, original, displayed);

                    assert!((back.x - position.x).abs() <= half_span_x + 1e-9);
                    assert!((back.y - position.y).abs() <= half_span_y + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_positions_are_rejected() {
        let original = Size::new(256, 256);
        let displayed = Size::new(315, 202);

        assert_eq!(pick_point(Position::new(-0.5, 10.0), original, displayed), None);
        assert_eq!(pick_point(Position::new(10.0, -1.0), original, displayed), None);
        assert_eq!(pick_point(Position::new(315.0, 10.0), original, displayed), None);
        assert_eq!(pick_point(Position::new(10.0, 202.0), original, displayed), None);
        assert_eq!(pick_point(Position::new(f64::NAN, 10.0), original, displayed), None);
        assert!(pick_point(Position::new(314.9, 201.9), original, displayed).is_some());
    }

    #[test]
    fn test_empty_sizes_map_to_nothing() {
        let position = Position::new(1.0, 1.0);
        assert_eq!(to_original(position, Size::new(10, 10), Size::new(0, 10)), None);
        assert_eq!(to_original(position, Size::new(0, 10), Size::new(10, 10)), None);
    }

    #[test]
    fn test_is_valid_bounds() {
        let size = Size::new(4, 2);
        assert!(is_valid(Point::new(0, 0), size));
        assert!(is_valid(Point::new(3, 1), size));
        assert!(!is_valid(Point::new(4, 1), size));
        assert!(!is_valid(Point::new(3, 2), size));
        assert!(!is_valid(Point::new(-1, 0), size));
    }

    #[test]
    fn test_rescale_keeps_relative_position() {
        let moved = rescale(
            Position::new(50.0, 20.0),
            Size::new(100, 40),
            Size::new(300, 80),
        );
        assert_eq!(moved, Position::new(150.0, 40.0));
        assert_eq!(
            rescale(Position::new(1.0, 2.0), Size::default(), Size::new(3, 3)),
            Position::new(1.0, 2.0)
        );
    }
}
