//! Domain model for pools, participants, financial records, and the persisted
//! collection.
//!
//! The serde layout is wire-compatible with the historical document format:
//! camelCase field names, Portuguese enum strings, and `YYYY-MM-DD` dates.
//! Documents written before `quotaValue` and pool `status` existed load with
//! documented default substitutions instead of failing.

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// Per-quota price substituted for legacy pools persisted before the
/// `quotaValue` field existed.
pub const LEGACY_QUOTA_VALUE: f64 = 20.0;

/// Serde adapter for `YYYY-MM-DD` calendar dates.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    /// Serialize a date as `YYYY-MM-DD`.
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    /// Deserialize a date from `YYYY-MM-DD`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        Date::parse(&text, FORMAT).map_err(D::Error::custom)
    }
}

/// Whether a participant has paid for their quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Quotas are paid for.
    #[serde(rename = "Pago")]
    Paid,
    /// Payment is still due.
    #[default]
    #[serde(rename = "Pendente")]
    Pending,
}

impl PaymentStatus {
    /// The opposite status, used by the paid/pending toggle.
    pub fn toggled(self) -> Self {
        match self {
            PaymentStatus::Paid => PaymentStatus::Pending,
            PaymentStatus::Pending => PaymentStatus::Paid,
        }
    }
}

/// One person holding quotas in a pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Stable identifier, assigned at creation and immutable thereafter.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Phone number as typed, punctuation included. Comparisons strip
    /// everything but digits.
    #[serde(default)]
    pub phone: String,
    /// Number of purchased shares.
    pub quotas: u32,
    /// Payment status for the whole quota purchase.
    pub status: PaymentStatus,
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// Money spent on wagers.
    #[serde(rename = "Aposta")]
    Bet,
    /// Money received as winnings.
    #[serde(rename = "Premiação")]
    Prize,
}

/// One entry in a pool's financial ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    /// Stable identifier.
    pub id: Uuid,
    /// Calendar date of the entry; no time component is meaningful.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Bet or prize.
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// Non-negative monetary value.
    pub amount: f64,
    /// Optional free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Lifecycle status of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PoolStatus {
    /// Pool is running and visible to everyone.
    #[default]
    #[serde(rename = "Em andamento")]
    Active,
    /// Pool is over; only admins still see it.
    #[serde(rename = "Encerrado")]
    Closed,
}

/// A time-boxed group lottery-participation unit with its own participants
/// and financial ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    /// Stable identifier, immutable once assigned.
    pub id: Uuid,
    /// Display name, normalized to uppercase on input.
    pub name: String,
    /// First day of the active period.
    #[serde(with = "iso_date")]
    pub start_date: Date,
    /// Last day of the active period.
    #[serde(with = "iso_date")]
    pub end_date: Date,
    /// Price of one quota. Legacy documents without this field load with
    /// [`LEGACY_QUOTA_VALUE`].
    #[serde(default = "default_quota_value")]
    pub quota_value: f64,
    /// Active or closed. Legacy documents without this field load as active.
    #[serde(default)]
    pub status: PoolStatus,
    /// Participants, in insertion order. Display sorting is a derived view.
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Ledger entries, kept sorted descending by date after each insertion.
    #[serde(default)]
    pub financial_records: Vec<FinancialRecord>,
}

impl Pool {
    /// Look up a participant by id.
    pub fn participant(&self, id: Uuid) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Mutable participant lookup.
    pub fn participant_mut(&mut self, id: Uuid) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }
}

fn default_quota_value() -> f64 {
    LEGACY_QUOTA_VALUE
}

/// The entire persisted state: the root document read and written wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Every pool, in creation order. Absent in the wire document means empty.
    #[serde(default)]
    pub pools: Vec<Pool>,
}

impl Collection {
    /// Look up a pool by id.
    pub fn pool(&self, id: Uuid) -> Option<&Pool> {
        self.pools.iter().find(|p| p.id == id)
    }

    /// Mutable pool lookup.
    pub fn pool_mut(&mut self, id: Uuid) -> Option<&mut Pool> {
        self.pools.iter_mut().find(|p| p.id == id)
    }
}
