//! Assembles the data consumed by the external report renderer.
//!
//! The renderer itself (PDF layout, pagination) is a collaborator; this
//! module only prepares ordered, signed, display-ready values from a pool.

use time::Date;

use crate::{
    services::metrics::{self, PoolMetrics},
    state::pool::{PaymentStatus, Pool, RecordKind},
};

/// One line of the financial history table, date ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLine {
    /// Entry date.
    pub date: Date,
    /// Bet or prize.
    pub kind: RecordKind,
    /// Free-text note, empty when the record had none.
    pub description: String,
    /// Amount signed for display: bets negative, prizes positive.
    pub signed_amount: f64,
}

/// One line of the participant table, name ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantLine {
    /// Display name.
    pub name: String,
    /// Phone number as stored.
    pub phone: String,
    /// Purchased shares.
    pub quotas: u32,
    /// Payment status.
    pub status: PaymentStatus,
}

/// Fully laid-out report content for one pool.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolReport {
    /// Pool display name.
    pub pool_name: String,
    /// Active period, start and end.
    pub period: (Date, Date),
    /// Price of one quota.
    pub quota_value: f64,
    /// Summary figures.
    pub metrics: PoolMetrics,
    /// Ledger, sorted ascending by date.
    pub history: Vec<HistoryLine>,
    /// Participants, sorted by name.
    pub participants: Vec<ParticipantLine>,
}

/// Build the report content for a pool.
pub fn build(pool: &Pool) -> PoolReport {
    let mut history: Vec<HistoryLine> = pool
        .financial_records
        .iter()
        .map(|record| HistoryLine {
            date: record.date,
            kind: record.kind,
            description: record.description.clone().unwrap_or_default(),
            signed_amount: match record.kind {
                RecordKind::Bet => -record.amount,
                RecordKind::Prize => record.amount,
            },
        })
        .collect();
    history.sort_by_key(|line| line.date);

    let mut participants: Vec<ParticipantLine> = pool
        .participants
        .iter()
        .map(|p| ParticipantLine {
            name: p.name.clone(),
            phone: p.phone.clone(),
            quotas: p.quotas,
            status: p.status,
        })
        .collect();
    participants.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    PoolReport {
        pool_name: pool.name.clone(),
        period: (pool.start_date, pool.end_date),
        quota_value: pool.quota_value,
        metrics: metrics::compute(pool),
        history,
        participants,
    }
}

/// Prefilled message for the external messaging handoff.
pub fn share_message(pool: &Pool) -> String {
    let m = metrics::compute(pool);
    format!(
        "Resumo do bolão {}: arrecadado R$ {:.2}, apostas R$ {:.2}, prêmios R$ {:.2}, saldo R$ {:.2}.",
        pool.name, m.collected, m.bets, m.prizes, m.balance
    )
}

#[cfg(test)]
mod tests {
    use time::macros::date;
    use uuid::Uuid;

    use crate::state::pool::{FinancialRecord, Participant, PoolStatus};

    use super::*;

    fn sample_pool() -> Pool {
        Pool {
            id: Uuid::new_v4(),
            name: "AGOSTO/2024".into(),
            start_date: date!(2024 - 08 - 01),
            end_date: date!(2024 - 08 - 31),
            quota_value: 20.0,
            status: PoolStatus::Active,
            participants: vec![
                Participant {
                    id: Uuid::new_v4(),
                    name: "bruno".into(),
                    phone: String::new(),
                    quotas: 1,
                    status: PaymentStatus::Pending,
                },
                Participant {
                    id: Uuid::new_v4(),
                    name: "Ana".into(),
                    phone: "11999990000".into(),
                    quotas: 2,
                    status: PaymentStatus::Paid,
                },
            ],
            // Stored order is descending by date; the report flips it.
            financial_records: vec![
                FinancialRecord {
                    id: Uuid::new_v4(),
                    date: date!(2024 - 08 - 20),
                    kind: RecordKind::Prize,
                    amount: 50.0,
                    description: None,
                },
                FinancialRecord {
                    id: Uuid::new_v4(),
                    date: date!(2024 - 08 - 05),
                    kind: RecordKind::Bet,
                    amount: 30.0,
                    description: Some("Quina".into()),
                },
            ],
        }
    }

    #[test]
    fn history_is_ascending_with_signed_amounts() {
        let report = build(&sample_pool());
        assert_eq!(report.history.len(), 2);
        assert_eq!(report.history[0].date, date!(2024 - 08 - 05));
        assert_eq!(report.history[0].signed_amount, -30.0);
        assert_eq!(report.history[0].description, "Quina");
        assert_eq!(report.history[1].signed_amount, 50.0);
        assert_eq!(report.history[1].description, "");
    }

    #[test]
    fn participants_are_sorted_by_name_case_insensitively() {
        let report = build(&sample_pool());
        assert_eq!(report.participants[0].name, "Ana");
        assert_eq!(report.participants[1].name, "bruno");
    }

    #[test]
    fn share_message_references_the_pool_name() {
        let message = share_message(&sample_pool());
        assert!(message.contains("AGOSTO/2024"));
        assert!(message.contains("R$ 40.00"));
    }
}
