//! Repository detail core
//!
//! Domain model, reduction policies and the selection state machine for the
//! repository detail page. Nothing in here performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
