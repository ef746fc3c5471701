//! Property-based invariant tests for the video modal.
//!
//! Verifies, for arbitrary event sequences:
//! 1. Open ⇔ overlay visible ⇔ surface has a non-empty source
//! 2. Closed ⇒ surface paused at time 0
//! 3. Activating a trigger with a locator always ends Open on that locator
//! 4. Activating a trigger without one never mutates the surface
//! 5. Close applied twice is observably the same as once
//! 6. Playback rejection never changes modal state

use dreamer_core::headless::{MemoryOverlay, MemorySurface, MemoryTrigger};
use dreamer_core::{
    DismissChannel, MediaBinding, MediaSurface, ModalController, ModalState, Overlay, OverlayHit,
    TriggerId, TriggerRegistry,
};
use proptest::prelude::*;

type Modal = ModalController<MemoryTrigger, MemorySurface, MemoryOverlay>;

#[derive(Debug, Clone)]
enum Step {
    Activate(usize),
    CloseControl,
    Click(OverlayHit),
    Key(&'static str),
}

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_trigger() -> impl Strategy<Value = MemoryTrigger> {
    prop_oneof![
        Just(MemoryTrigger::without_source()),
        Just(MemoryTrigger::with_source("")),
        "[a-z]{1,8}".prop_map(|name| MemoryTrigger::with_source(&format!("videos/{name}.mp4"))),
    ]
}

fn arb_step(triggers: usize) -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (0..triggers).prop_map(Step::Activate),
        1 => Just(Step::CloseControl),
        1 => Just(Step::Click(OverlayHit::Backdrop)),
        1 => Just(Step::Click(OverlayHit::Content)),
        1 => prop_oneof![Just("Escape"), Just("Esc"), Just("Enter"), Just("a")].prop_map(Step::Key),
    ]
}

fn arb_scenario() -> impl Strategy<Value = (Vec<MemoryTrigger>, Vec<Step>)> {
    prop::collection::vec(arb_trigger(), 1..6).prop_flat_map(|triggers| {
        let n = triggers.len();
        (Just(triggers), prop::collection::vec(arb_step(n), 0..40))
    })
}

fn build(triggers: Vec<MemoryTrigger>, surface: MemorySurface) -> Modal {
    ModalController::new(
        TriggerRegistry::snapshot(triggers),
        MediaBinding::new(surface),
        MemoryOverlay::new(),
    )
}

fn apply(modal: &mut Modal, step: &Step) {
    match step {
        Step::Activate(idx) => {
            modal.activate(TriggerId(*idx));
        }
        Step::CloseControl => {
            modal.on_close_control();
        }
        Step::Click(hit) => {
            modal.on_overlay_click(*hit);
        }
        Step::Key(key) => {
            modal.on_key(key);
        }
    }
}

fn assert_consistent(modal: &Modal) -> Result<(), TestCaseError> {
    let surface = modal.media().surface();
    let open = modal.state() == ModalState::Open;
    prop_assert_eq!(open, modal.overlay().is_visible());
    prop_assert_eq!(open, !surface.src().is_empty());
    if !open {
        prop_assert!(!surface.is_playing());
        prop_assert_eq!(surface.current_time(), 0.0);
    }
    Ok(())
}

proptest! {
    #[test]
    fn state_overlay_and_source_agree((triggers, steps) in arb_scenario()) {
        let mut modal = build(triggers, MemorySurface::new());
        assert_consistent(&modal)?;
        for step in &steps {
            apply(&mut modal, step);
            assert_consistent(&modal)?;
        }
    }

    #[test]
    fn activation_follows_locator((triggers, steps) in arb_scenario(), pick in any::<prop::sample::Index>()) {
        let idx = pick.index(triggers.len());
        let expected = dreamer_core::trigger::resolve_locator(&triggers[idx]);
        let mut modal = build(triggers, MemorySurface::new());
        for step in &steps {
            apply(&mut modal, step);
        }
        let state_before = modal.state();
        let src_before = modal.media().surface().src();
        let ops_before = modal.media().surface().ops().len();

        modal.activate(TriggerId(idx));

        if expected.is_empty() {
            prop_assert_eq!(modal.state(), state_before);
            prop_assert_eq!(modal.media().surface().src(), src_before);
            prop_assert_eq!(modal.media().surface().ops().len(), ops_before);
        } else {
            prop_assert_eq!(modal.state(), ModalState::Open);
            prop_assert_eq!(modal.media().surface().src(), expected.as_str());
            prop_assert!(modal.media().surface().is_playing());
            prop_assert!(!modal.media().surface().is_muted());
        }
    }

    #[test]
    fn close_is_idempotent((triggers, steps) in arb_scenario()) {
        let mut modal = build(triggers, MemorySurface::new());
        for step in &steps {
            apply(&mut modal, step);
        }
        modal.close(DismissChannel::Host);
        let once = (
            modal.state(),
            modal.overlay().is_visible(),
            modal.media().surface().src(),
            modal.media().surface().is_playing(),
            modal.media().surface().current_time(),
        );
        modal.close(DismissChannel::Host);
        let twice = (
            modal.state(),
            modal.overlay().is_visible(),
            modal.media().surface().src(),
            modal.media().surface().is_playing(),
            modal.media().surface().current_time(),
        );
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn rejected_playback_never_changes_state((triggers, steps) in arb_scenario()) {
        let mut accepting = build(triggers.clone(), MemorySurface::new());
        let mut rejecting = build(triggers, MemorySurface::new().rejecting_play());
        for step in &steps {
            apply(&mut accepting, step);
            apply(&mut rejecting, step);
            prop_assert_eq!(accepting.state(), rejecting.state());
            prop_assert_eq!(accepting.media().surface().src(), rejecting.media().surface().src());
        }
    }
}
