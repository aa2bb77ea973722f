use std::cell::RefCell;

use futures::executor::block_on;
use wire::LayoutPatch;

use super::*;

/// Records every request and answers with a fixed outcome.
struct Recording {
    sent: RefCell<Vec<UpdateElementRequest>>,
    outcome: Result<(), TransportError>,
}

impl Recording {
    fn answering(outcome: Result<(), TransportError>) -> Self {
        Self { sent: RefCell::new(Vec::new()), outcome }
    }
}

impl PatchTransport for Recording {
    async fn send(&self, request: &UpdateElementRequest) -> Result<(), TransportError> {
        self.sent.borrow_mut().push(request.clone());
        self.outcome.clone()
    }
}

fn request() -> UpdateElementRequest {
    UpdateElementRequest::new("b1", LayoutPatch { left: Some("115px".into()), ..LayoutPatch::default() })
}

#[test]
fn deliver_sends_once_and_reports_success() {
    let transport = Recording::answering(Ok(()));
    assert_eq!(block_on(deliver(&transport, &request())), Ok(()));
    assert_eq!(transport.sent.borrow().as_slice(), &[request()]);
}

#[test]
fn deliver_passes_failures_through() {
    let err = TransportError::Network("connection refused".into());
    let transport = Recording::answering(Err(err.clone()));
    assert_eq!(block_on(deliver(&transport, &request())), Err(err));
}

#[test]
fn success_body_is_accepted() {
    assert_eq!(check_response(200, r#"{"success":true}"#), Ok(()));
}

#[test]
fn failure_body_carries_code_and_message() {
    let body = r#"{"success":false,"error":"no element carries data-enigma-id=\"x\"","code":"E_NOT_FOUND"}"#;
    let err = check_response(500, body).unwrap_err();
    assert_eq!(
        err,
        TransportError::Rejected {
            status: 500,
            code: Some("E_NOT_FOUND".into()),
            message: "no element carries data-enigma-id=\"x\"".into(),
        }
    );
}

#[test]
fn success_false_with_ok_status_is_rejected() {
    let err = check_response(200, r#"{"success":false}"#).unwrap_err();
    assert!(matches!(err, TransportError::Rejected { status: 200, .. }));
}

#[test]
fn non_json_bodies() {
    assert!(matches!(check_response(200, "<html>"), Err(TransportError::Decode { .. })));
    assert!(matches!(
        check_response(502, "Bad Gateway\n"),
        Err(TransportError::Rejected { status: 502, ref message, .. }) if message == "Bad Gateway"
    ));
}
