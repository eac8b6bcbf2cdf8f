//! Property-based tests for drop and resize math.

use sitecraft_geometry::{
    resolve_drop_point, Point, ResizeDirection, ResizeSession, Size, StartBox,
};

const EPSILON: f32 = 1e-3;

fn positioned(left: f32, top: f32, width: f32, height: f32) -> StartBox {
    StartBox {
        width,
        height,
        left,
        top,
        margin_left: 0.0,
        margin_top: 0.0,
        positioned: true,
    }
}

proptest::proptest! {
    /// The same content pixel resolves identically whether it is reached by
    /// scrolling or by pointing further along with no scroll.
    #[test]
    fn drop_point_is_scroll_invariant(
        px in 0i32..2000, py in 0i32..2000,
        ox in 0i32..500, oy in 0i32..500,
        sx in 0i32..1000, sy in 0i32..1000,
    ) {
        let origin = Point::new(ox as f32, oy as f32);
        let scroll = Point::new(sx as f32, sy as f32);
        let extent = Size::new(3000.0, 3000.0);
        let pointer = Point::new(px as f32, py as f32);

        let scrolled = resolve_drop_point(pointer, origin, scroll, extent);
        let unscrolled = resolve_drop_point(pointer.add_point(scroll), origin, Point::default(), extent);
        assert!((scrolled.x() - unscrolled.x()).abs() < EPSILON);
        assert!((scrolled.y() - unscrolled.y()).abs() < EPSILON);
    }

    /// Resolved points never leave the scrollable content.
    #[test]
    fn drop_point_stays_in_extent(
        px in -5000i32..5000, py in -5000i32..5000,
        sx in 0i32..1000, sy in 0i32..1000,
        w in 0i32..2000, h in 0i32..2000,
    ) {
        let at = resolve_drop_point(
            Point::new(px as f32, py as f32),
            Point::new(100.0, 100.0),
            Point::new(sx as f32, sy as f32),
            Size::new(w as f32, h as f32),
        );
        assert!(at.x() >= 0.0 && at.x() <= w as f32);
        assert!(at.y() >= 0.0 && at.y() <= h as f32);
    }

    /// South-east changes width by dx and height by dy, never the offsets.
    #[test]
    fn south_east_tracks_delta(
        width in 0i32..1000, height in 0i32..1000,
        dx in -1000i32..1000, dy in -1000i32..1000,
    ) {
        proptest::prop_assume!(dx >= -width && dy >= -height);
        let start = positioned(20.0, 30.0, width as f32, height as f32);
        let session = ResizeSession::new(ResizeDirection::SouthEast, Point::new(0.0, 0.0), start);
        let frame = session.frame_for(Point::new(dx as f32, dy as f32));

        assert!((frame.width.unwrap() - (width + dx) as f32).abs() < EPSILON);
        assert!((frame.height.unwrap() - (height + dy) as f32).abs() < EPSILON);
        assert_eq!(frame.left, None);
        assert_eq!(frame.top, None);
    }

    /// North-west on a positioned node keeps the bottom-right corner fixed.
    #[test]
    fn north_west_anchors_bottom_right(
        left in 0i32..1000, top in 0i32..1000,
        width in 0i32..1000, height in 0i32..1000,
        dx in -2000i32..2000, dy in -2000i32..2000,
    ) {
        let start = positioned(left as f32, top as f32, width as f32, height as f32);
        let session = ResizeSession::new(ResizeDirection::NorthWest, Point::new(0.0, 0.0), start);
        let frame = session.frame_for(Point::new(dx as f32, dy as f32));

        let (l, w) = (frame.left.unwrap(), frame.width.unwrap());
        let (t, h) = (frame.top.unwrap(), frame.height.unwrap());
        assert!(w >= 0.0 && h >= 0.0);
        assert!(l >= 0.0 && t >= 0.0);
        assert!((l + w - start.right()).abs() < EPSILON);
        assert!((t + h - start.bottom()).abs() < EPSILON);
    }

    /// Every handle yields non-negative sizes.
    #[test]
    fn sizes_never_negative(
        index in 0usize..8,
        positioned_node in proptest::bool::ANY,
        dx in -5000i32..5000, dy in -5000i32..5000,
    ) {
        let start = StartBox {
            positioned: positioned_node,
            ..positioned(10.0, 10.0, 100.0, 100.0)
        };
        let session = ResizeSession::new(ResizeDirection::ALL[index], Point::new(0.0, 0.0), start);
        let frame = session.frame_for(Point::new(dx as f32, dy as f32));
        assert!(frame.width.unwrap_or(0.0) >= 0.0);
        assert!(frame.height.unwrap_or(0.0) >= 0.0);
    }
}
