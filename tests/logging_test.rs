//! Checks what the gate writes to the log, and that tokens never appear.

use std::io;
use std::sync::{Arc, Mutex};

use request_gate::{Authorizer, CredentialStore, OutgoingRequest, Session, Whitelist};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(run: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, run);
    captured.text()
}

#[test]
fn decisions_are_logged_without_tokens() {
    let output = capture(|| {
        let store = Arc::new(CredentialStore::default());
        let session = Session::new(Arc::clone(&store));
        let authorizer = Authorizer::new(Whitelist::site_default(), store);

        authorizer
            .authorize(OutgoingRequest::get("/api/penalty/list"))
            .unwrap();
        authorizer
            .authorize(OutgoingRequest::get("/api/setting/config"))
            .unwrap_err();
        session.login("SECRET_TOKEN_XYZ");
        authorizer
            .authorize(OutgoingRequest::get("/api/setting/config?verbose=1"))
            .unwrap();
        session.logout();
    });

    assert!(output.contains("whitelisted request passed through"));
    assert!(output.contains("no credential found, request aborted"));
    assert!(output.contains("bearer credential attached"));
    assert!(output.contains("credential stored"));
    assert!(output.contains("credential removed"));
    assert!(output.contains("/api/setting/config"));
    assert!(!output.contains("verbose=1"));
    assert!(!output.contains("SECRET_TOKEN_XYZ"));
}

#[test]
fn refusal_is_a_warning() {
    let output = capture(|| {
        let authorizer = Authorizer::new(
            Whitelist::site_default(),
            Arc::new(CredentialStore::default()),
        );
        let _ = authorizer.authorize(OutgoingRequest::post("/api/video/delete"));
    });

    let line = output
        .lines()
        .find(|l| l.contains("request aborted"))
        .expect("refusal logged");
    assert!(line.contains("WARN"));
    assert!(line.contains("POST"));
}
