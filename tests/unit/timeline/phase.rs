use super::*;

#[test]
fn phase_table_boundaries() {
    assert_eq!(Phase::from_progress(0.0), Phase::Orbit);
    assert_eq!(Phase::from_progress(0.6999), Phase::Orbit);
    assert_eq!(Phase::from_progress(0.7), Phase::Label);
    assert_eq!(Phase::from_progress(0.9999), Phase::Label);
    assert_eq!(Phase::from_progress(1.0), Phase::Done);
}

#[test]
fn phase_never_regresses_as_progress_grows() {
    let mut prev = Phase::Orbit;
    for i in 0..=10_000 {
        let phase = Phase::from_progress(f64::from(i) / 10_000.0);
        assert!(phase >= prev, "regressed at step {i}");
        prev = phase;
    }
    assert_eq!(prev, Phase::Done);
}

#[test]
fn progress_is_clamped_exactly() {
    assert_eq!(progress_at(3500.0, 3500.0), 1.0);
    assert_eq!(progress_at(9999.0, 3500.0), 1.0);
    assert_eq!(progress_at(-5.0, 3500.0), 0.0);
    assert_eq!(progress_at(f64::NAN, 3500.0), 0.0);
    assert_eq!(progress_at(1750.0, 3500.0), 0.5);
}

#[test]
fn captions_follow_phase() {
    assert_eq!(Phase::Orbit.caption(), "Loading...");
    assert_eq!(Phase::Label.caption(), "Optimizing...");
    assert_eq!(Phase::Done.caption(), "Ready!");
}

#[test]
fn field_window_overlaps_label_window() {
    let p = 0.75;
    assert_eq!(Phase::from_progress(p), Phase::Label);
    assert!(p > ORBIT_END && p < CONVERGE_END);
}
