use scatter_viewport::telemetry::{init_default_tracing, init_tracing_with_filter};

#[test]
fn tracing_installs_at_most_once() {
    let first = init_default_tracing();
    assert_eq!(first, cfg!(feature = "telemetry"));

    assert!(!init_tracing_with_filter("warn"));
}
