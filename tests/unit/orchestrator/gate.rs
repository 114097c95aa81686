use super::*;

#[test]
fn second_acquire_is_rejected_until_the_permit_drops() {
    let gate = BusyGate::default();
    let permit = gate.try_acquire().expect("free gate");
    assert!(gate.is_held());
    assert!(gate.try_acquire().is_none());
    drop(permit);
    assert!(!gate.is_held());
    assert!(gate.try_acquire().is_some());
}

#[test]
fn force_release_frees_a_held_gate() {
    let gate = BusyGate::default();
    let _permit = gate.try_acquire().unwrap();
    gate.force_release();
    assert!(!gate.is_held());
}

#[test]
fn only_one_of_many_threads_wins() {
    let gate = BusyGate::default();
    let wins = std::sync::atomic::AtomicUsize::new(0);
    let barrier = std::sync::Barrier::new(8);
    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                barrier.wait();
                if let Some(p) = gate.try_acquire() {
                    wins.fetch_add(1, Ordering::SeqCst);
                    // Hold until every thread has tried.
                    std::mem::forget(p);
                }
            });
        }
    });
    assert_eq!(wins.load(Ordering::SeqCst), 1);
}
