//! Application layer containing the cart orchestration.
//!
//! `CartEngine` is the single owner of the cart. Mutations are serialized
//! through an async lock so each one runs to completion (validate, persist,
//! commit) before the next reads its working copy.

pub mod config;
pub mod engine;
pub mod messages;
pub mod snapshot;
