use super::*;

#[test]
fn tokens_observe_cancellation() {
    let source = LivenessSource::new();
    let a = source.token();
    let b = a.clone();
    assert!(!a.is_cancelled());
    assert!(source.cancel());
    assert!(a.is_cancelled());
    assert!(b.is_cancelled());
    assert!(source.is_cancelled());
}

#[test]
fn cancel_reports_only_the_first_call() {
    let source = LivenessSource::new();
    assert!(source.cancel());
    assert!(!source.cancel());
}

#[tokio::test]
async fn cancelled_wakes_waiters() {
    let source = LivenessSource::new();
    let mut token = source.token();
    let waiter = tokio::spawn(async move { token.cancelled().await });
    tokio::task::yield_now().await;
    source.cancel();
    waiter.await.unwrap();
}

#[tokio::test]
async fn cancelled_returns_immediately_when_already_cancelled() {
    let source = LivenessSource::new();
    source.cancel();
    source.token().cancelled().await;
}
