//! Property tests for the modal state machine.
//!
//! Random sequences of caller intents and user dismissals are replayed
//! against a controller and a small reference model; callbacks, state, and
//! the overlay layer must agree with the model after every step.

#![forbid(unsafe_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use mantle_widgets::modal::{
    ModalCloseButton, ModalContent, ModalController, ModalProps, ModalTransition,
};
use mantle_widgets::{NodeKind, OverlayManager};
use proptest::prelude::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Debug, Clone, Copy)]
enum Op {
    SetOpen(bool),
    TapBackdrop,
    TapCloseButton,
    Escape,
    Flush,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<bool>().prop_map(Op::SetOpen),
        1 => Just(Op::TapBackdrop),
        1 => Just(Op::TapCloseButton),
        1 => Just(Op::Escape),
        2 => Just(Op::Flush),
    ]
}

/// Reference model of the controller.
#[derive(Debug, Default)]
struct Model {
    intent: bool,
    open: bool,
    pending: bool,
    shows: u32,
    closes: u32,
}

impl Model {
    fn close(&mut self) {
        self.open = false;
        self.pending = false;
        self.closes += 1;
    }

    fn flush(&mut self) {
        if self.pending && self.open {
            self.close();
        }
        self.pending = false;
    }

    fn apply(&mut self, op: Op) {
        match op {
            Op::SetOpen(open) => {
                self.flush();
                let previous = std::mem::replace(&mut self.intent, open);
                match (open, previous, self.open) {
                    (true, false, false) => {
                        self.open = true;
                        self.shows += 1;
                    }
                    (false, _, true) => self.close(),
                    _ => {}
                }
            }
            Op::TapBackdrop | Op::TapCloseButton | Op::Escape => {
                if self.open {
                    self.pending = true;
                }
            }
            Op::Flush => self.flush(),
        }
    }
}

struct Harness {
    overlays: OverlayManager,
    modal: ModalController,
    shows: Rc<Cell<u32>>,
    closes: Rc<Cell<u32>>,
}

impl Harness {
    fn new() -> Self {
        let shows = Rc::new(Cell::new(0));
        let closes = Rc::new(Cell::new(0));
        let on_show = Rc::clone(&shows);
        let on_close = Rc::clone(&closes);
        let modal = ModalController::new(
            ModalProps::new()
                .on_show(move || on_show.set(on_show.get() + 1))
                .on_close(move |open| {
                    assert!(!open);
                    on_close.set(on_close.get() + 1);
                }),
        )
        .child(ModalContent::new().child(ModalCloseButton::new()));
        Self {
            overlays: OverlayManager::new(),
            modal,
            shows,
            closes,
        }
    }

    fn press(&self, kind: NodeKind) {
        let layers = self.overlays.render().expect("modal renders");
        if let Some(node) = layers.last().and_then(|layer| layer.find_kind(kind)) {
            node.press();
        }
    }

    fn apply(&mut self, op: Op) {
        match op {
            Op::SetOpen(open) => {
                self.modal.set_open(open, &mut self.overlays);
            }
            Op::TapBackdrop => self.press(NodeKind::TouchCapture),
            Op::TapCloseButton => self.press(NodeKind::Button),
            Op::Escape => {
                self.overlays.request_dismiss_top();
            }
            Op::Flush => {
                self.modal.flush(&mut self.overlays);
            }
        }
    }
}

proptest! {
    #[test]
    fn controller_matches_reference_model(ops in prop::collection::vec(op(), 0..64)) {
        let mut harness = Harness::new();
        let mut model = Model::default();

        for op in ops {
            harness.apply(op);
            model.apply(op);

            prop_assert_eq!(harness.modal.is_open(), model.open, "after {:?}", op);
            prop_assert_eq!(harness.modal.intent(), model.intent);
            prop_assert_eq!(harness.overlays.len(), usize::from(model.open));
            prop_assert_eq!(harness.modal.has_pending_dismissal(), model.pending);
            prop_assert_eq!(harness.shows.get(), model.shows);
            prop_assert_eq!(harness.closes.get(), model.closes);
        }

        // Every close pairs with an earlier show.
        prop_assert_eq!(
            harness.shows.get() - harness.closes.get(),
            u32::from(harness.modal.is_open())
        );
    }

    #[test]
    fn repeated_open_intent_never_stacks(repeats in 1usize..16) {
        let mut harness = Harness::new();
        for _ in 0..repeats {
            harness.modal.set_open(true, &mut harness.overlays);
        }
        prop_assert_eq!(harness.overlays.len(), 1);
        prop_assert_eq!(harness.shows.get(), 1);
        prop_assert_eq!(
            harness.modal.set_open(false, &mut harness.overlays),
            vec![ModalTransition::Closed(mantle_widgets::modal::CloseReason::Intent)]
        );
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Captures the `message` of every event.
#[derive(Clone, Default)]
struct Messages(Arc<Mutex<Vec<String>>>);

struct MessageVisitor<'a>(&'a mut Option<String>);

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S: Subscriber> Layer<S> for Messages {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = None;
        event.record(&mut MessageVisitor(&mut message));
        if let (Some(message), Ok(mut log)) = (message, self.0.lock()) {
            log.push(message);
        }
    }
}

#[test]
fn transitions_are_logged() {
    let messages = Messages::default();
    let subscriber = tracing_subscriber::registry().with(messages.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut harness = Harness::new();
        harness.modal.set_open(true, &mut harness.overlays);
        harness.modal.set_open(true, &mut harness.overlays);
        harness.press(NodeKind::Button);
        harness.modal.flush(&mut harness.overlays);
    });

    let log = messages.0.lock().expect("log lock").clone();
    for expected in ["modal shown", "modal refreshed", "modal closed"] {
        assert!(
            log.iter().any(|m| m == expected),
            "missing {expected:?} in {log:?}"
        );
    }
}
