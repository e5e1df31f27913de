//! Pure derived metrics over a pool's participants and ledger.
//!
//! Nothing here is cached: every value is recomputed on read from the current
//! participants and records, which keeps the store free of invalidation
//! logic. Computation is linear in the pool size.

use crate::state::pool::{PaymentStatus, Pool, RecordKind};

/// Quota tallies split by payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuotaCounts {
    /// All quotas across every participant.
    pub total: u32,
    /// Quotas held by participants marked paid.
    pub paid: u32,
    /// Quotas still awaiting payment.
    pub pending: u32,
}

/// Every derived figure for a pool, computed in one pass per input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolMetrics {
    /// Money collected from paid participants.
    pub collected: f64,
    /// Total spent on wagers.
    pub bets: f64,
    /// Total received as winnings.
    pub prizes: f64,
    /// `collected - bets + prizes`.
    pub balance: f64,
    /// Quota tallies.
    pub quotas: QuotaCounts,
}

/// Sum of `quotas * quota_value` over participants marked paid.
pub fn collected_amount(pool: &Pool) -> f64 {
    pool.participants
        .iter()
        .filter(|p| p.status == PaymentStatus::Paid)
        .map(|p| f64::from(p.quotas) * pool.quota_value)
        .sum()
}

/// Sum of amounts over bet records.
pub fn total_bets(pool: &Pool) -> f64 {
    sum_records(pool, RecordKind::Bet)
}

/// Sum of amounts over prize records.
pub fn total_prizes(pool: &Pool) -> f64 {
    sum_records(pool, RecordKind::Prize)
}

/// Collected amount minus bets plus prizes.
pub fn balance(pool: &Pool) -> f64 {
    collected_amount(pool) - total_bets(pool) + total_prizes(pool)
}

/// Quota tallies split by payment status.
pub fn quota_counts(pool: &Pool) -> QuotaCounts {
    let total = pool.participants.iter().map(|p| p.quotas).sum();
    let paid = pool
        .participants
        .iter()
        .filter(|p| p.status == PaymentStatus::Paid)
        .map(|p| p.quotas)
        .sum();
    QuotaCounts {
        total,
        paid,
        pending: total - paid,
    }
}

/// Compute every metric at once.
pub fn compute(pool: &Pool) -> PoolMetrics {
    PoolMetrics {
        collected: collected_amount(pool),
        bets: total_bets(pool),
        prizes: total_prizes(pool),
        balance: balance(pool),
        quotas: quota_counts(pool),
    }
}

fn sum_records(pool: &Pool, kind: RecordKind) -> f64 {
    pool.financial_records
        .iter()
        .filter(|r| r.kind == kind)
        .map(|r| r.amount)
        .sum()
}
