use super::*;

#[test]
fn translate_then_scale_matches_manual_mapping() {
    let t = Transform2D::IDENTITY.translate(10.0, -2.5).scale(2.0, 2.0);
    assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(12.0, -0.5));
    assert_eq!(t.translation(), Vec2::new(10.0, -2.5));
}

#[test]
fn translate_is_applied_in_local_space() {
    let t = Transform2D::IDENTITY.scale(4.0, 4.0).translate(1.0, 0.0);
    assert_eq!(t.apply(Point::ZERO), Point::new(4.0, 0.0));
}

#[test]
fn then_composes_outer_after_inner() {
    let outer = Transform2D::IDENTITY.translate(5.0, 5.0);
    let inner = Transform2D::IDENTITY.scale(2.0, 3.0);
    let t = outer.then(inner);
    assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(7.0, 8.0));
    assert_eq!(t.scale_factors(), (2.0, 3.0));
    assert!(t.is_axis_aligned());
    assert!(!Transform2D::from(Affine::rotate(0.3)).is_axis_aligned());
}

#[test]
fn straight_roundtrip_for_opaque_and_transparent() {
    let c = Rgba8Premul::opaque(10, 20, 30);
    assert_eq!(c.to_straight(), [10, 20, 30, 255]);
    assert_eq!(Rgba8Premul::transparent().to_straight(), [0, 0, 0, 0]);

    let half = Rgba8Premul::from_straight_rgba(200, 100, 0, 128);
    let [r, g, b, a] = half.to_straight();
    assert_eq!(a, 128);
    assert!((i32::from(r) - 200).abs() <= 1);
    assert!((i32::from(g) - 100).abs() <= 1);
    assert_eq!(b, 0);
}

#[test]
fn viewport_emptiness() {
    assert!(Viewport::new(0, 10).is_empty());
    assert!(Viewport::new(10, 0).is_empty());
    assert!(!Viewport::new(1, 1).is_empty());
    assert_eq!(Viewport::new(100, 50).center(), Point::new(50.0, 25.0));
}
