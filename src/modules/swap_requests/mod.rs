//! Swap-request ledger: creating requests, reading inbox and outbox, and
//! the recipient's accept/reject decision.

pub mod controller;
pub mod router;
pub mod service;
