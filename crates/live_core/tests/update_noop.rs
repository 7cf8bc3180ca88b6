use live_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn tick_does_not_dirty_state() {
    let state = AppState::new();
    let (mut next, effects) = update(state, Msg::Tick);

    assert!(!next.consume_dirty());
    assert!(effects.is_empty());
}

#[test]
fn dismissing_absent_banners_is_noop() {
    let state = AppState::new();
    let (next, _) = update(state.clone(), Msg::ErrorDismissed);
    let (next, _) = update(next, Msg::WarningDismissed);

    assert_eq!(state, next);
}
