/// Pure derived metrics over pool data.
pub mod metrics;
/// Collection mutations and remote write-back scheduling.
pub mod pool_service;
/// Report document assembly for the external renderer.
pub mod report;
/// Bet-suggestion pass-through types.
pub mod suggestion;
/// Pool visibility rules for admin and public sessions.
pub mod visibility;
