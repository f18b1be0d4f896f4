use super::*;

#[test]
fn fixed_advance_scales_with_size_and_length() {
    let mut m = FixedAdvanceMetrics::default();
    let e = m.measure("FPS: 60", 10.0);
    assert!((e.width - 7.0 * 6.0).abs() < 1e-9);
    assert!((e.height - 12.0).abs() < 1e-9);
    assert_eq!(m.measure("", 10.0).width, 0.0);
}

#[test]
fn fixed_advance_ignores_negative_sizes() {
    let mut m = FixedAdvanceMetrics::default();
    assert_eq!(m.measure("abc", -4.0), TextExtent::default());
}

#[test]
fn engine_rejects_bytes_without_fonts() {
    assert!(TextLayoutEngine::with_font(b"definitely not a font".to_vec()).is_err());
}
