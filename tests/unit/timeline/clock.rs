use super::*;

#[test]
fn start_latches_on_first_tick() {
    let mut c = PhaseClock::new(1000.0);
    assert_eq!(c.start_ms(), None);
    assert_eq!(c.tick(250.0), 0.0);
    assert_eq!(c.start_ms(), Some(250.0));
    assert_eq!(c.tick(750.0), 0.5);
    assert_eq!(c.start_ms(), Some(250.0));
}

#[test]
fn progress_never_moves_backwards() {
    let mut c = PhaseClock::new(1000.0);
    c.tick(0.0);
    assert_eq!(c.tick(800.0), 0.8);
    assert_eq!(c.tick(100.0), 0.8);
    assert_eq!(c.phase(), Phase::Label);
}

#[test]
fn progress_clamps_to_one() {
    let mut c = PhaseClock::new(1000.0);
    c.tick(0.0);
    assert_eq!(c.tick(1000.0), 1.0);
    assert_eq!(c.tick(5000.0), 1.0);
    assert_eq!(c.phase(), Phase::Done);
}
