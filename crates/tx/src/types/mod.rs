//! Wire structures: action payloads, the action envelope, and the
//! transaction assembler.

pub mod action;
pub mod data;
pub mod transaction;
