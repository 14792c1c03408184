#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use restmetrics_core::hooks::{self, RegisterOpts};
use restmetrics_core::{ExpiryMetric, ResultMetric};

#[derive(Default)]
struct RecordingResults {
    calls: Mutex<Vec<(String, String, String)>>,
}

impl ResultMetric for RecordingResults {
    fn increment(&self, code: &str, method: &str, host: &str) {
        self.calls
            .lock()
            .unwrap()
            .push((code.to_string(), method.to_string(), host.to_string()));
    }
}

#[derive(Default)]
struct RecordingTtl {
    last: Mutex<Option<Option<chrono::Duration>>>,
}

impl ExpiryMetric for RecordingTtl {
    fn set(&self, ttl: Option<chrono::Duration>) {
        *self.last.lock().unwrap() = Some(ttl);
    }
}

// Registration is process-wide, so the whole sequence lives in one test.
#[test]
fn register_installs_hooks_once() {
    let results = Arc::new(RecordingResults::default());
    let ttl = Arc::new(RecordingTtl::default());

    hooks::register(RegisterOpts {
        request_result: Some(results.clone()),
        client_cert_ttl: Some(ttl.clone()),
        ..Default::default()
    })
    .expect("first registration");
    assert!(hooks::is_registered());

    hooks::request_result().increment("200", "GET", "api.example.com");
    hooks::request_result().increment("503", "POST", "api.example.com");
    hooks::client_cert_ttl().set(Some(chrono::Duration::minutes(5)));

    // unset hooks stay no-op
    hooks::client_cert_rotation_age().observe(Duration::from_secs(600));

    assert_eq!(
        *results.calls.lock().unwrap(),
        vec![
            ("200".to_string(), "GET".to_string(), "api.example.com".to_string()),
            ("503".to_string(), "POST".to_string(), "api.example.com".to_string()),
        ]
    );
    assert_eq!(
        *ttl.last.lock().unwrap(),
        Some(Some(chrono::Duration::minutes(5)))
    );

    let second = Arc::new(RecordingResults::default());
    let err = hooks::register(RegisterOpts {
        request_result: Some(second.clone()),
        ..Default::default()
    })
    .expect_err("second registration must fail");
    assert_eq!(err.code().as_str(), "ALREADY_REGISTERED");

    hooks::request_result().increment("404", "GET", "other.example.com");
    assert!(second.calls.lock().unwrap().is_empty());
    assert_eq!(results.calls.lock().unwrap().len(), 3);
}
