//! USSD session gateway HTTP service.
//!
//! This crate provides the HTTP surface of the gateway:
//!
//! - The aggregator callback (`POST /ussd`), answered in the `CON`/`END` text grammar
//! - Account management (create, look up, delete)
//! - Read access to the callback request audit log
//! - Background SMS notices through the configured provider
//!
//! # Sessions
//!
//! The gateway keeps no session state. Each callback is classified from the
//! cumulative input the aggregator resends, dispatched against the store, and
//! answered immediately.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers are async for axum even when the store is sync

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod sms;
pub mod state;

pub use config::ServiceConfig;
pub use dispatch::{dispatch, Dispatch, SmsNotice};
pub use error::ApiError;
pub use routes::create_router;
pub use sms::{SmsClient, SmsError, SmsNotifier};
pub use state::AppState;
