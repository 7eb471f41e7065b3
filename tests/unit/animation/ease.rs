use super::*;

const ALL: [Ease; 4] = [Ease::Linear, Ease::InCubic, Ease::OutCubic, Ease::InOutCubic];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn in_out_cubic_is_smooth_at_midpoint() {
    let e = Ease::InOutCubic;
    assert!((e.apply(0.5) - 0.5).abs() < 1e-12);

    let h = 1e-6;
    let left = (e.apply(0.5) - e.apply(0.5 - h)) / h;
    let right = (e.apply(0.5 + h) - e.apply(0.5)) / h;
    assert!((left - right).abs() < 1e-3, "slopes {left} vs {right}");
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::InOutCubic.apply(-3.0), 0.0);
    assert_eq!(Ease::InOutCubic.apply(7.5), 1.0);
}
