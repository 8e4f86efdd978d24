//! Request construction and response handling for the push notifications
//! service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, which keeps validation, wire framing and error
//! classification deterministic and testable.
//!
//! # Design
//! - `ClientConfig` is immutable once built and is the only state a
//!   `PushClient` holds.
//! - Each operation is split into `build_*` (validate, then produce a
//!   request) and `parse_*` (normalize the response), so the I/O boundary is
//!   explicit.
//! - Token generation is local and synchronous.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod response;
pub mod token;
pub mod types;
pub mod validate;

pub use client::{PushClient, LIBRARY_HEADER, LIBRARY_ID};
pub use config::{ClientConfig, Scheme};
pub use error::{ApiError, ArgumentError, BoxError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{PublishRequest, TargetKind, Token};
