//! State-management core for a "bolão" (lottery-pool) administration app.
//!
//! The crate owns the in-memory collection of pools, every mutation over it,
//! the derived financial metrics, the admin/public visibility rules, and the
//! session state machine that decides which pool is selected. Persistence is
//! a single JSON document pushed wholesale to a remote endpoint after each
//! mutation; rendering, PDF generation, and the AI bet-suggestion backend are
//! external collaborators that consume the types exposed here.

pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod services;
pub mod state;
