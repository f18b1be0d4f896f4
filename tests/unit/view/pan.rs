use super::*;

fn pan() -> PanController {
    PanController::new(PanOpts::default())
}

#[test]
fn drag_moves_center_against_pointer_in_world_units() {
    let mut p = pan();
    p.begin_drag(Point::new(100.0, 100.0));
    p.update(0.5, Some(Point::new(110.0, 95.0)), 0.25);
    assert_eq!(p.center(), Point::new(-20.0, 10.0));
    assert_eq!(p.velocity(), Vec2::new(-80.0, 40.0));
}

#[test]
fn missing_pointer_suspends_drag_tracking() {
    let mut p = pan();
    p.begin_drag(Point::new(0.0, 0.0));
    p.update(1.0, None, 0.02);
    assert_eq!(p.center(), Point::ZERO);
    p.update(1.0, Some(Point::new(50.0, 50.0)), 0.02);
    assert_eq!(p.center(), Point::ZERO);
    p.update(1.0, Some(Point::new(60.0, 50.0)), 0.02);
    assert_eq!(p.center(), Point::new(-10.0, 0.0));
}

#[test]
fn glide_distance_depends_only_on_elapsed_time() {
    let mut a = pan();
    a.begin_drag(Point::ZERO);
    a.update(1.0, Some(Point::new(-40.0, 0.0)), 0.25);
    a.end_drag();
    let mut b = a.clone();

    a.update(1.0, None, 0.5);
    for _ in 0..4 {
        b.update(1.0, None, 0.125);
    }
    assert!((a.center() - b.center()).hypot() < 1e-6);
    assert!(a.center().x > 40.0);
}

#[test]
fn glide_stops_below_threshold() {
    let mut p = pan();
    p.begin_drag(Point::ZERO);
    p.update(1.0, Some(Point::new(-10.0, 0.0)), 0.1);
    p.end_drag();
    for _ in 0..100 {
        p.update(1.0, None, 0.1);
    }
    assert_eq!(p.velocity(), Vec2::ZERO);
}

#[test]
fn no_glide_without_smooth_scrolling() {
    let mut p = PanController::new(PanOpts {
        smooth: false,
        ..PanOpts::default()
    });
    p.begin_drag(Point::ZERO);
    p.update(1.0, Some(Point::new(-10.0, 0.0)), 0.1);
    p.end_drag();
    let c = p.center();
    p.update(1.0, None, 0.1);
    assert_eq!(p.center(), c);
}

#[test]
fn key_velocity_scales_with_time_and_zoom() {
    let mut p = pan();
    p.set_key_velocity(Vec2::new(100.0, 0.0));
    p.update(2.0, None, 0.5);
    assert_eq!(p.center(), Point::new(25.0, 0.0));
    p.update(2.0, None, 0.0);
    assert_eq!(p.center(), Point::new(25.0, 0.0));
}
