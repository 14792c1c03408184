#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use restmetrics_core::hooks;
use restmetrics_prometheus::instruments::{
    EXEC_PLUGIN_ROTATION_AGE, EXEC_PLUGIN_TTL, REQUESTS_TOTAL, REQUEST_DURATION,
    REQUEST_LATENCY_DEPRECATED,
};
use restmetrics_prometheus::{legacy_registry, ops};
use url::Url;

use common::sample;

// init() is process-wide, so the whole lifecycle runs in one test.
#[test]
fn init_wires_hooks_to_legacy_registry() {
    assert!(!hooks::is_registered());
    restmetrics_prometheus::init().expect("first init");
    assert!(hooks::is_registered());

    let read = || ops::render(legacy_registry()).unwrap();

    // defined "no data" state before any TTL report
    assert_eq!(sample(&read(), EXEC_PLUGIN_TTL, &[]), Some(f64::INFINITY));

    for _ in 0..3 {
        hooks::request_result().increment("200", "GET", "api.example.com");
    }
    let text = read();
    assert_eq!(
        sample(&text, REQUESTS_TOTAL, &[("code", "200"), ("method", "GET"), ("host", "api.example.com")]),
        Some(3.0)
    );
    assert_eq!(
        sample(&text, REQUESTS_TOTAL, &[("code", "500"), ("method", "GET"), ("host", "api.example.com")]),
        None
    );

    hooks::client_cert_ttl().set(None);
    assert_eq!(sample(&read(), EXEC_PLUGIN_TTL, &[]), Some(f64::INFINITY));
    hooks::client_cert_ttl().set(Some(chrono::Duration::minutes(5)));
    assert_eq!(sample(&read(), EXEC_PLUGIN_TTL, &[]), Some(300.0));

    let u = Url::parse("https://api.example.com/apis/apps/v1/deployments").unwrap();
    hooks::request_latency().observe("LIST", &u, Duration::from_millis(40));
    hooks::client_cert_rotation_age().observe(Duration::from_secs(604_800));

    let text = read();
    let labels = [("verb", "LIST"), ("url", u.as_str())];
    assert_eq!(sample(&text, &format!("{REQUEST_DURATION}_count"), &labels), Some(1.0));
    assert_eq!(sample(&text, &format!("{REQUEST_LATENCY_DEPRECATED}_count"), &labels), Some(1.0));
    assert_eq!(sample(&text, &format!("{EXEC_PLUGIN_ROTATION_AGE}_sum"), &[]), Some(604_800.0));

    let err = restmetrics_prometheus::init().expect_err("second init must fail");
    assert_eq!(err.code().as_str(), "ALREADY_REGISTERED");

    // a rejected install must not leave orphan instruments behind
    let fresh = prometheus::Registry::new();
    let err = restmetrics_prometheus::install(&fresh).expect_err("hooks already installed");
    assert_eq!(err.code().as_str(), "ALREADY_REGISTERED");
    assert!(fresh.gather().is_empty());
    restmetrics_prometheus::RestClientMetrics::new()
        .unwrap()
        .register(&fresh)
        .expect("fresh registry holds nothing from the failed install");

    // the first installation keeps working
    hooks::request_result().increment("200", "GET", "api.example.com");
    assert_eq!(
        sample(&read(), REQUESTS_TOTAL, &[("code", "200"), ("method", "GET"), ("host", "api.example.com")]),
        Some(4.0)
    );
}
