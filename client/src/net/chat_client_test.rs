use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::channel::oneshot;
use futures::executor::block_on;

use super::*;
use crate::state::session::{ChatPhase, SESSION_MESSAGE_CAP};
use crate::util::fallback::CONTACT_REPLY;

/// Replies immediately, recording every request.
#[derive(Default)]
struct RecordingTransport {
    requests: RefCell<Vec<ProxyRequest>>,
    fail: bool,
}

impl ChatTransport for &RecordingTransport {
    async fn send(&self, request: &ProxyRequest) -> Result<String, String> {
        self.requests.borrow_mut().push(request.clone());
        if self.fail { Err("HTTP 500".to_owned()) } else { Ok(format!("echo: {}", request.message)) }
    }
}

/// Blocks until the test releases the reply.
struct GatedTransport {
    gate: RefCell<Option<oneshot::Receiver<Result<String, String>>>>,
    calls: Cell<usize>,
}

impl ChatTransport for &GatedTransport {
    async fn send(&self, _request: &ProxyRequest) -> Result<String, String> {
        self.calls.set(self.calls.get() + 1);
        let gate = self.gate.borrow_mut().take().ok_or_else(|| "gate already used".to_owned())?;
        gate.await.map_err(|e| e.to_string())?
    }
}

#[test]
fn submit_round_trip_records_reply() {
    let transport = RecordingTransport::default();
    let controller = ChatController::new(&transport);

    block_on(controller.submit("hello"));

    let session = controller.session();
    assert_eq!(session.phase(), ChatPhase::Idle);
    assert_eq!(session.transcript().last().map(|e| e.text.as_str()), Some("echo: hello"));
    assert_eq!(transport.requests.borrow().len(), 1);
}

#[test]
fn failed_send_shows_fallback() {
    let transport = RecordingTransport { fail: true, ..Default::default() };
    let controller = ChatController::new(&transport);

    block_on(controller.submit("what's your email?"));

    assert_eq!(controller.session().transcript().last().map(|e| e.text.as_str()), Some(CONTACT_REPLY));
}

#[test]
fn empty_input_makes_no_request() {
    let transport = RecordingTransport::default();
    let controller = ChatController::new(&transport);
    block_on(controller.submit("   "));
    assert!(transport.requests.borrow().is_empty());
    assert!(controller.session().transcript().entries().is_empty());
}

#[test]
fn cap_stops_network_calls() {
    let transport = RecordingTransport::default();
    let controller = ChatController::new(&transport);

    block_on(async {
        for i in 0..SESSION_MESSAGE_CAP {
            controller.submit(&format!("q{i}")).await;
        }
        controller.submit("over the limit").await;
    });

    assert_eq!(transport.requests.borrow().len(), SESSION_MESSAGE_CAP as usize);
    assert_eq!(controller.session().phase(), ChatPhase::Blocked);
    assert_eq!(controller.session().counter().sent(), SESSION_MESSAGE_CAP);
}

#[test]
fn later_requests_carry_prior_turns() {
    let transport = RecordingTransport::default();
    let controller = ChatController::new(&transport);

    block_on(async {
        controller.submit("first").await;
        controller.submit("second").await;
    });

    let requests = transport.requests.borrow();
    assert!(requests[0].history.is_empty());
    assert_eq!(requests[1].message, "second");
    assert_eq!(requests[1].history.len(), 2);
    assert_eq!(requests[1].history[1].content, "echo: first");
}

#[test]
fn second_submit_during_flight_is_dropped() {
    let (release, gate) = oneshot::channel();
    let transport = GatedTransport { gate: RefCell::new(Some(gate)), calls: Cell::new(0) };
    let controller = ChatController::new(&transport);
    let c = &controller;

    block_on(async {
        futures::join!(c.submit("first"), async move {
            assert!(c.is_sending());
            c.submit("second").await;
            assert!(release.send(Ok("done".to_owned())).is_ok());
        });
    });

    assert_eq!(transport.calls.get(), 1);
    let session = controller.session();
    assert_eq!(session.phase(), ChatPhase::Idle);
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.transcript().last().map(|e| e.text.as_str()), Some("done"));
}

#[test]
fn observer_sees_sending_then_idle() {
    let transport = RecordingTransport::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let controller = ChatController::new(&transport)
        .with_observer(move |session: &ChatSession| sink.borrow_mut().push(session.input_enabled()));

    block_on(controller.submit("hi"));

    assert_eq!(*seen.borrow(), vec![false, true]);
}
