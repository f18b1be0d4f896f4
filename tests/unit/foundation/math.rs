use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"tilescope");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_bytes(b"tile");
    b.write_bytes(b"scope");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_distinguishes_coordinates() {
    let hash = |x: i64, y: i64| {
        let mut h = Fnv1a64::new_default();
        h.write_i64(x);
        h.write_i64(y);
        h.finish()
    };
    assert_ne!(hash(1, 2), hash(2, 1));
    assert_eq!(hash(-3, 7), hash(-3, 7));
}

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
}
