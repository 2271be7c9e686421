//! Farmstand Mailer library.
//!
//! A single-route relay: `POST /send-email` turns a report into an HTML
//! email and hands it to the Resend API. Delivery sits behind
//! [`email::EmailSender`] so the router can run against an in-process fake.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod email;
pub mod resend;
pub mod routes;

pub use email::{EmailSender, OutgoingEmail, SendError, compose_report};
pub use resend::ResendClient;
pub use routes::{AppState, app};
