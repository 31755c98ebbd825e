use super::*;

#[test]
fn point_arithmetic_behaves_like_vectors() {
    let a = Point::new(3.0, 4.0);
    let b = Point::new(1.0, -2.0);

    assert_eq!(a + b, Point::new(4.0, 2.0));
    assert_eq!(a - b, Point::new(2.0, 6.0));
    assert_eq!(a * 2.0, Point::new(6.0, 8.0));
    assert_eq!(a / 2.0, Point::new(1.5, 2.0));
    assert_eq!(-a, Point::new(-3.0, -4.0));
    assert_eq!(a.length(), 5.0);
    assert_eq!(a.dot(b), -5.0);
}

#[test]
fn normalizing_zero_vector_stays_zero() {
    assert_eq!(Point::ZERO.normalized(), Point::ZERO);
    let unit = Point::new(0.0, 10.0).normalized();
    assert!((unit.y - 1.0).abs() < 1e-6);
}

#[test]
fn rotation_is_counter_clockwise() {
    let rotated = Point::new(1.0, 0.0).rotated(std::f32::consts::FRAC_PI_2);
    assert!(rotated.x.abs() < 1e-6);
    assert!((rotated.y - 1.0).abs() < 1e-6);
}

#[test]
fn bounding_rect_covers_all_points() {
    let rect = Rect::bounding(&[
        Point::new(-1.0, 2.0),
        Point::new(3.0, -4.0),
        Point::new(0.5, 0.5),
    ])
    .expect("non-empty");
    assert_eq!(rect, Rect::new(-1.0, -4.0, 4.0, 6.0));
    assert!(Rect::bounding(&[]).is_none());
}

#[test]
fn intersect_returns_none_for_disjoint_rects() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(20.0, 20.0, 5.0, 5.0);
    assert!(a.intersect(&b).is_none());
    assert_eq!(
        a.intersect(&Rect::new(5.0, 5.0, 10.0, 10.0)),
        Some(Rect::new(5.0, 5.0, 5.0, 5.0))
    );
    assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 25.0, 25.0));
}
