//! Pill Dispenser - HTTP link to the pill dispenser device
//!
//! The device exposes a single `GET /update` endpoint. Every request is
//! at-most-once: nothing is retried and failures are only logged.

mod client;
mod config;
mod http;
mod request;
mod traits;

pub use client::DispenserClient;
pub use config::DispenserConfig;
pub use http::HttpTransport;
pub use request::DispenserRequest;
pub use traits::DispenserTransport;
