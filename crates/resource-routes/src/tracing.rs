//! # Observability & Tracing
//!
//! Every stage of the compiler logs through `tracing` with structured fields
//! (`resource`, `action`, `route`, `methods`, `key`):
//!
//! - **debug**: descriptors built, actions registered, endpoints compiled, handler calls
//! - **info**: resource types defined and registered
//! - **warn**: handler failures, contract violations, instance URLs omitted
//!
//! ```bash
//! RUST_LOG=info cargo run -p resource-sample
//! RUST_LOG=resource_routes=debug cargo run -p resource-sample
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
