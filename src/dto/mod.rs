//! Input payloads for the mutation operations.

/// Validation and normalization helpers.
pub mod validation;

use serde::Deserialize;
use time::Date;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::state::pool::{PaymentStatus, PoolStatus, RecordKind, iso_date};

use self::validation::validate_phone;

/// Payload used to create a new pool.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePoolRequest {
    /// Display name; normalized to uppercase on creation.
    #[validate(length(min = 1, message = "pool name must not be empty"))]
    pub name: String,
    /// First day of the active period.
    #[serde(with = "iso_date")]
    pub start_date: Date,
    /// Last day of the active period.
    #[serde(with = "iso_date")]
    pub end_date: Date,
    /// Price of one quota.
    #[validate(range(min = 0.01, message = "quota value must be positive"))]
    pub quota_value: f64,
    /// Initial lifecycle status; defaults to active.
    #[serde(default)]
    pub status: PoolStatus,
    /// Clone participants (quotas and phones preserved, payment reset to
    /// pending, fresh ids) from this existing pool.
    #[serde(default)]
    pub base_pool_id: Option<Uuid>,
}

/// Payload replacing a pool's mutable fields; the id never changes.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePoolRequest {
    /// New display name; normalized to uppercase.
    #[validate(length(min = 1, message = "pool name must not be empty"))]
    pub name: String,
    /// New start of the active period.
    #[serde(with = "iso_date")]
    pub start_date: Date,
    /// New end of the active period.
    #[serde(with = "iso_date")]
    pub end_date: Date,
    /// New per-quota price.
    #[validate(range(min = 0.01, message = "quota value must be positive"))]
    pub quota_value: f64,
    /// New lifecycle status.
    pub status: PoolStatus,
}

/// Payload used both to create a participant and to edit an existing one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInput {
    /// Display name.
    pub name: String,
    /// Phone number as typed; may be empty.
    #[serde(default)]
    pub phone: String,
    /// Number of purchased shares, at least one.
    pub quotas: u32,
    /// Payment status; defaults to pending.
    #[serde(default)]
    pub status: PaymentStatus,
}

impl Validate for ParticipantInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            let mut err = validator::ValidationError::new("name_empty");
            err.message = Some("Participant name must not be empty".into());
            errors.add("name", err);
        }

        if self.quotas == 0 {
            let mut err = validator::ValidationError::new("quotas_zero");
            err.message = Some("Participant must hold at least one quota".into());
            errors.add("quotas", err);
        }

        if let Err(err) = validate_phone(&self.phone) {
            errors.add("phone", err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Payload used to append a ledger entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecordInput {
    /// Calendar date of the entry.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Bet or prize.
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// Non-negative monetary value.
    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: f64,
    /// Optional free-text note.
    #[serde(default)]
    pub description: Option<String>,
}
