//! LINE Messaging API integration
//!
//! Signature verification, the webhook payload model and the reply client.
//! Everything here sits outside the orchestrator: it only hands message text
//! in and sends the resulting reply back out.

pub mod client;
pub mod events;
pub mod signature;

pub use client::{LineClient, MAX_MESSAGE_CHARS};
pub use events::{InboundText, WebhookPayload};
pub use signature::{SIGNATURE_HEADER, create_signature, verify_signature};
