//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`. Module paths are hidden (`with_target(false)`); spans such as
//! `menu` or `submit_order` are shown inline instead.
//!
//! ```bash
//! # Notices, logins and submitted orders
//! RUST_LOG=info kafe orders
//!
//! # Every request and poll tick
//! RUST_LOG=debug kafe watch-orders
//! ```
//!
//! With `RUST_LOG=debug` a poll cycle looks like:
//!
//! ```text
//! INFO Poller started task="orders" period_ms=5000
//! DEBUG list_orders: Sending request
//! DEBUG Orders refreshed count=3
//! ```
//!
//! Session tokens are never written to the log; [`Session`](crate::session::Session)
//! redacts them in its `Debug` output.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
