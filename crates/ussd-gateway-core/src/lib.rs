//! Core types for the USSD session gateway.
//!
//! This crate provides the domain types shared by the store and the HTTP service:
//!
//! - **Identifiers**: `AccountId`, `CallbackLogId`
//! - **Accounts**: `Account`, `NewAccount`, `Otp`
//! - **Audit**: `CallbackLog`, `NewCallbackLog`
//! - **Protocol**: `UssdRequest` (callback normalization), `MenuState` (menu
//!   classification), `UssdResponse` (the `CON`/`END` reply grammar)
//!
//! # Sessions
//!
//! No session state lives in the gateway. The aggregator resends the cumulative
//! `*`-delimited input on every callback and `MenuState::classify` recovers the menu
//! position from it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod callback_log;
pub mod error;
pub mod ids;
pub mod menu;
pub mod otp;
pub mod request;
pub mod response;

pub use account::{Account, NewAccount};
pub use callback_log::{CallbackLog, NewCallbackLog};
pub use error::{AccountError, OtpError, RequestError};
pub use ids::{AccountId, CallbackLogId};
pub use menu::MenuState;
pub use otp::Otp;
pub use request::UssdRequest;
pub use response::UssdResponse;
