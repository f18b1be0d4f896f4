use super::*;
use crate::{
    assets::table::AssetTable,
    render::{accel::DrawPath, surface::RecordingSurface},
};

fn border() -> Border {
    let table = AssetTable::with_builtin_chrome().unwrap();
    Border::new(&ChromeAssets::resolve(&table).unwrap(), 10)
}

#[test]
fn pieces_frame_the_viewport() {
    let b = border();
    let p = b.placements(Viewport::new(200, 100));
    assert_eq!(p[0].1, Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(p[1].1, Rect::new(190.0, 0.0, 200.0, 10.0));
    assert_eq!(p[2].1, Rect::new(0.0, 90.0, 10.0, 100.0));
    assert_eq!(p[3].1, Rect::new(190.0, 90.0, 200.0, 100.0));
    assert_eq!(p[4].1, Rect::new(10.0, 0.0, 190.0, 10.0));
    assert_eq!(p[5].1, Rect::new(10.0, 90.0, 190.0, 100.0));
    assert_eq!(p[6].1, Rect::new(0.0, 10.0, 10.0, 90.0));
    assert_eq!(p[7].1, Rect::new(190.0, 10.0, 200.0, 90.0));
}

#[test]
fn always_logs_eight_operations() {
    let b = border();
    for vp in [Viewport::new(640, 480), Viewport::new(5, 5), Viewport::new(0, 0)] {
        let mut s = RecordingSurface::with_path(DrawPath::Fallback);
        let mut sampler = AccelerationSampler::new();
        b.draw(&mut s, vp, &mut sampler);
        assert_eq!(sampler.operation_count(), 8);
        assert_eq!(sampler.accelerated_count(), 0);
        assert_eq!(s.calls().len(), 8);
    }
}
