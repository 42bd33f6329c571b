use super::*;

#[test]
fn trace_macros_compile() {
    // No-ops without the tracing feature
    trace!("trace message");
    debug!(count = 3, "debug message");
    info!("info message");
    warn!("warn message");
    error!("error message");

    let _entered = debug_span!("entered_span").entered();
    let _round = info_span!("round", rule = 1).entered();
}

#[test]
fn init_subscriber_is_idempotent() {
    init_subscriber();
    init_subscriber();
}
