//! Pool visibility rules for admin and public sessions.
//!
//! Filtering stops at the pool level: once a pool is visible, everything in
//! it is readable. Only mutation is admin-gated, and that gate lives in the
//! host UI.

use crate::state::pool::{Pool, PoolStatus};

/// Whether a single pool is visible to the current viewer.
pub fn is_pool_visible(pool: &Pool, is_admin: bool) -> bool {
    is_admin || pool.status == PoolStatus::Active
}

/// Pools the current viewer may select, in stored order.
pub fn visible_pools(pools: &[Pool], is_admin: bool) -> Vec<&Pool> {
    pools
        .iter()
        .filter(|pool| is_pool_visible(pool, is_admin))
        .collect()
}
