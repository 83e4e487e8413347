use super::*;

#[test]
fn cancel_is_shared_between_clones() {
    let token = CancelToken::new();
    let clone = token.clone();
    assert!(clone.check().is_ok());
    token.cancel();
    assert!(clone.is_cancelled());
    assert!(matches!(clone.check(), Err(FramecraftError::Cancelled)));
}

#[test]
fn elapsed_deadline_cancels() {
    let token = CancelToken::with_timeout(Duration::ZERO);
    assert!(token.is_cancelled());
    let later = CancelToken::with_timeout(Duration::from_secs(3600));
    assert!(!later.is_cancelled());
}

#[test]
fn deadline_keeps_the_shared_flag() {
    let token = CancelToken::new();
    let bounded = token.clone().with_deadline(Duration::from_secs(3600));
    assert!(!bounded.is_cancelled());
    token.cancel();
    assert!(bounded.is_cancelled());
    assert!(token.clone().with_deadline(Duration::ZERO).is_cancelled());
}
