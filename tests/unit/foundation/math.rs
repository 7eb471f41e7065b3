use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn next_in_stays_inside_band() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        let v = rng.next_in(0.02, 0.03);
        assert!((0.02..0.03).contains(&v));
    }
}

#[test]
fn lerp_hits_endpoints() {
    assert_eq!(lerp(60.0, 140.0, 0.0), 60.0);
    assert_eq!(lerp(60.0, 140.0, 1.0), 140.0);
    assert_eq!(lerp(60.0, 140.0, 0.5), 100.0);
}
