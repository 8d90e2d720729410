//! mimematch - Accept header negotiation
//!
//! Parses HTTP `Accept` header values and resolves which served content type
//! best satisfies the client's preferences.

pub mod accept;
pub mod config;

pub use accept::{
    AcceptHeader, AcceptSource, BestMatch, InvalidMimeType, InvalidReason, MimeType, Result,
    Specificity, get_best_match, is_more_specific,
};
