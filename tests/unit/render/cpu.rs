use super::*;

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 1)
}

#[test]
fn rejects_empty_and_oversized_surfaces() {
    assert!(CpuSurface::new(0, 10).is_err());
    assert!(CpuSurface::new(70_000, 10).is_err());
    assert!(CpuSurface::new(8, 8).is_ok());
}

#[test]
fn fill_rect_respects_transform() {
    let mut s = CpuSurface::new(8, 8).unwrap();
    s.set_transform(Transform2D::IDENTITY.translate(4.0, 0.0));
    let path = s.fill_rect(Rect::new(0.0, 0.0, 4.0, 8.0), Rgba8Premul::opaque(255, 0, 0));
    assert_eq!(path, DrawPath::Accelerated);

    let frame = s.finish();
    assert!(frame.premultiplied);
    assert_eq!(px(&frame, 1, 1), [0, 0, 0, 0]);
    assert!(close(px(&frame, 6, 1), [255, 0, 0, 255]));
}

#[test]
fn translucent_fill_is_fallback() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    s.set_opacity(0.5);
    let path = s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8Premul::opaque(0, 0, 255));
    assert_eq!(path, DrawPath::Fallback);
    let frame = s.finish();
    let [_, _, b, a] = px(&frame, 2, 2);
    assert!((120..=135).contains(&a), "alpha {a}");
    assert!((120..=135).contains(&b), "blue {b}");
}

#[test]
fn first_image_draw_uploads_then_accelerates() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    let img = RasterImage::solid(2, 2, [0, 255, 0, 255]).unwrap();
    let dest = Rect::new(0.0, 0.0, 4.0, 4.0);

    assert_eq!(s.draw_image(&img, dest), DrawPath::Fallback);
    assert_eq!(s.cached_images(), 1);
    assert_eq!(s.draw_image(&img, dest), DrawPath::Accelerated);

    s.set_opacity(0.5);
    assert_eq!(s.draw_image(&img, dest), DrawPath::Fallback);
    s.set_opacity(1.0);
    s.set_transform(Transform2D::from(Affine::rotate(0.3)));
    assert_eq!(s.draw_image(&img, dest), DrawPath::Fallback);
}

#[test]
fn translucent_image_never_accelerates() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    let img = RasterImage::solid(1, 1, [0, 0, 0, 100]).unwrap();
    let dest = Rect::new(0.0, 0.0, 4.0, 4.0);
    s.draw_image(&img, dest);
    assert_eq!(s.draw_image(&img, dest), DrawPath::Fallback);
}

#[test]
fn cache_evicts_least_recently_used() {
    let mut s = CpuSurface::new(4, 4).unwrap().with_cache_capacity(1);
    let a = RasterImage::solid(1, 1, [255, 0, 0, 255]).unwrap();
    let b = RasterImage::solid(1, 1, [0, 255, 0, 255]).unwrap();
    let dest = Rect::new(0.0, 0.0, 1.0, 1.0);

    s.draw_image(&a, dest);
    s.draw_image(&b, dest);
    assert_eq!(s.cached_images(), 1);
    assert_eq!(s.draw_image(&a, dest), DrawPath::Fallback);
}

#[test]
fn nearest_image_keeps_hard_edges() {
    let img = RasterImage::from_premul_rgba8(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    let mut s = CpuSurface::new(4, 1).unwrap();
    s.set_interpolation(Interpolation::Nearest);
    s.draw_image(&img, Rect::new(0.0, 0.0, 4.0, 1.0));
    let frame = s.finish();
    assert!(close(px(&frame, 0, 0), [255, 0, 0, 255]));
    assert!(close(px(&frame, 3, 0), [0, 0, 255, 255]));
}

#[test]
fn texture_fill_covers_area() {
    let tex = RasterImage::solid(2, 2, [10, 20, 30, 255]).unwrap();
    let mut s = CpuSurface::new(16, 16).unwrap();
    s.fill_texture(&tex, 4.0, Rect::new(0.0, 0.0, 12.0, 16.0));
    let frame = s.finish();
    assert!(close(px(&frame, 0, 0), [10, 20, 30, 255]));
    assert!(close(px(&frame, 11, 15), [10, 20, 30, 255]));
    assert_eq!(px(&frame, 14, 4), [0, 0, 0, 0]);
}

#[test]
fn degenerate_draws_are_skipped() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    let img = RasterImage::solid(1, 1, [255, 255, 255, 255]).unwrap();
    s.draw_image(&img, Rect::new(0.0, 0.0, 0.0, 4.0));
    assert_eq!(s.cached_images(), 0);
    let frame = s.finish();
    assert!(frame.data.iter().all(|b| *b == 0));
}

#[test]
fn text_without_font_draws_nothing() {
    let mut s = CpuSurface::new(4, 4).unwrap();
    assert!(!s.has_font());
    let path = s.draw_text("hi", Point::ZERO, 12.0, Rgba8Premul::BLACK);
    assert_eq!(path, DrawPath::Fallback);
    assert!(s.finish().data.iter().all(|b| *b == 0));
}

#[test]
fn finish_starts_a_fresh_frame() {
    let mut s = CpuSurface::new(2, 2).unwrap();
    s.set_opacity(0.2);
    s.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Rgba8Premul::BLACK);
    let _ = s.finish();
    assert_eq!(s.opacity(), 1.0);
    assert!(s.finish().data.iter().all(|b| *b == 0));
}

#[test]
fn straight_conversion_unpremultiplies() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    assert_eq!(frame.to_straight_rgba8(), vec![128, 0, 0, 128]);
}
