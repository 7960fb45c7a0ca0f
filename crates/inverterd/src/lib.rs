//! inverterd - Inverter bridge daemon
//!
//! A long-lived, line-delimited JSON request/response bridge to a solar
//! inverter. Requests arrive one JSON object per line on stdin, replies
//! leave one JSON object per line on stdout, and a single lazily-created
//! device session is torn down and re-established across failures.
//!
//! # Architecture
//!
//! ```text
//! stdin ──lines──▶ dispatch ──commands──▶ Session ──traits──▶ driver
//!                      │                     │
//!                      ▼                     └── Option<Arc<dyn Inverter>>
//! stdout ◀──replies── Response                   (dropped on any failure)
//! ```
//!
//! Requests are processed strictly one at a time, in input order; the
//! session handle is owned by the loop's single thread of control, so no
//! synchronization is needed around it.

pub mod bridge;
pub mod config;
pub mod dispatch;
pub mod rpc;
pub mod session;

pub use bridge::run_bridge;
pub use config::BridgeConfig;
pub use session::Session;
