//! Mutation operations over the pool collection.
//!
//! Every operation validates its input, applies synchronously to the
//! in-memory collection, and then schedules a best-effort write-back of the
//! whole document. A failed write-back never rolls local state back; the
//! failure is logged and published on the state's save-error channel.
//! Mutation targets that no longer exist are treated as stale and ignored.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{
        CreatePoolRequest, FinancialRecordInput, ParticipantInput, UpdatePoolRequest,
        validation::normalize_phone,
    },
    error::ServiceError,
    state::{
        SharedState,
        pool::{FinancialRecord, Participant, PaymentStatus, Pool},
        session::SessionEvent,
    },
};

/// Create a new pool and select it.
///
/// When `base_pool_id` points at an existing pool, its participants are
/// cloned into the new one with fresh ids and payment reset to pending, so a
/// recurring group carries over between months.
pub async fn create_pool(
    state: &SharedState,
    request: CreatePoolRequest,
) -> Result<Pool, ServiceError> {
    request.validate().map_err(|err| invalid("create pool", err))?;
    let name = request.name.trim().to_uppercase();
    if name.is_empty() {
        return Err(ServiceError::InvalidInput(
            "cannot create pool: name must not be empty".into(),
        ));
    }
    if request.end_date < request.start_date {
        return Err(ServiceError::InvalidInput(
            "cannot create pool: end date precedes start date".into(),
        ));
    }

    let pool = {
        let mut guard = state.collection_cell().write().await;
        let collection = guard.as_mut().ok_or(ServiceError::NotLoaded)?;

        let participants = request
            .base_pool_id
            .and_then(|id| collection.pool(id))
            .map(|base| carry_over_participants(base))
            .unwrap_or_default();

        let pool = Pool {
            id: Uuid::new_v4(),
            name,
            start_date: request.start_date,
            end_date: request.end_date,
            quota_value: request.quota_value,
            status: request.status,
            participants,
            financial_records: Vec::new(),
        };
        collection.pools.push(pool.clone());
        pool
    };

    state
        .apply_session_event(SessionEvent::PoolCreated(pool.id))
        .await;
    schedule_save(state).await;
    Ok(pool)
}

/// Replace a pool's mutable fields in place; its id never changes.
pub async fn update_pool(
    state: &SharedState,
    id: Uuid,
    request: UpdatePoolRequest,
) -> Result<(), ServiceError> {
    request.validate().map_err(|err| invalid("update pool", err))?;
    let name = request.name.trim().to_uppercase();
    if name.is_empty() {
        return Err(ServiceError::InvalidInput(
            "cannot update pool: name must not be empty".into(),
        ));
    }
    if request.end_date < request.start_date {
        return Err(ServiceError::InvalidInput(
            "cannot update pool: end date precedes start date".into(),
        ));
    }

    {
        let mut guard = state.collection_cell().write().await;
        let collection = guard.as_mut().ok_or(ServiceError::NotLoaded)?;
        let Some(pool) = collection.pool_mut(id) else {
            debug!(pool = %id, "update target vanished; ignoring");
            return Ok(());
        };
        pool.name = name;
        pool.start_date = request.start_date;
        pool.end_date = request.end_date;
        pool.quota_value = request.quota_value;
        pool.status = request.status;
    }

    schedule_save(state).await;
    Ok(())
}

/// Remove a pool together with all its participants and records.
///
/// If the deleted pool was selected, the selection falls back to the first
/// remaining pool, or to none.
pub async fn delete_pool(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    let removed = {
        let mut guard = state.collection_cell().write().await;
        let collection = guard.as_mut().ok_or(ServiceError::NotLoaded)?;
        let before = collection.pools.len();
        collection.pools.retain(|pool| pool.id != id);
        collection.pools.len() != before
    };

    if !removed {
        debug!(pool = %id, "delete target vanished; ignoring");
        return Ok(());
    }

    state
        .apply_session_event(SessionEvent::PoolDeleted(id))
        .await;
    schedule_save(state).await;
    Ok(())
}

/// Create a participant, or merge the input into an existing one when
/// `participant_id` is given.
///
/// If the submitted phone number (digits only) matches another participant
/// in the same pool, the save is rejected with
/// [`ServiceError::DuplicatePhone`]; the participant being edited is excluded
/// from that comparison.
pub async fn save_participant(
    state: &SharedState,
    pool_id: Uuid,
    input: ParticipantInput,
    participant_id: Option<Uuid>,
) -> Result<(), ServiceError> {
    input
        .validate()
        .map_err(|err| invalid("save participant", err))?;

    let changed = {
        let mut guard = state.collection_cell().write().await;
        let collection = guard.as_mut().ok_or(ServiceError::NotLoaded)?;
        let Some(pool) = collection.pool_mut(pool_id) else {
            debug!(pool = %pool_id, "participant save target pool vanished; ignoring");
            return Ok(());
        };

        let digits = normalize_phone(&input.phone);
        if !digits.is_empty()
            && pool
                .participants
                .iter()
                .any(|p| Some(p.id) != participant_id && normalize_phone(&p.phone) == digits)
        {
            return Err(ServiceError::DuplicatePhone);
        }

        match participant_id {
            Some(id) => match pool.participant_mut(id) {
                Some(participant) => {
                    participant.name = input.name.trim().to_string();
                    participant.phone = input.phone;
                    participant.quotas = input.quotas;
                    participant.status = input.status;
                    true
                }
                None => {
                    debug!(pool = %pool_id, participant = %id, "edit target vanished; ignoring");
                    false
                }
            },
            None => {
                pool.participants.push(Participant {
                    id: Uuid::new_v4(),
                    name: input.name.trim().to_string(),
                    phone: input.phone,
                    quotas: input.quotas,
                    status: input.status,
                });
                true
            }
        }
    };

    if changed {
        schedule_save(state).await;
    }
    Ok(())
}

/// Flip one participant between paid and pending.
pub async fn toggle_participant_status(
    state: &SharedState,
    pool_id: Uuid,
    participant_id: Uuid,
) -> Result<(), ServiceError> {
    let changed = {
        let mut guard = state.collection_cell().write().await;
        let collection = guard.as_mut().ok_or(ServiceError::NotLoaded)?;
        match collection
            .pool_mut(pool_id)
            .and_then(|pool| pool.participant_mut(participant_id))
        {
            Some(participant) => {
                participant.status = participant.status.toggled();
                true
            }
            None => {
                debug!(pool = %pool_id, participant = %participant_id, "toggle target vanished; ignoring");
                false
            }
        }
    };

    if changed {
        schedule_save(state).await;
    }
    Ok(())
}

/// Remove a participant from a pool.
pub async fn delete_participant(
    state: &SharedState,
    pool_id: Uuid,
    participant_id: Uuid,
) -> Result<(), ServiceError> {
    let changed = {
        let mut guard = state.collection_cell().write().await;
        let collection = guard.as_mut().ok_or(ServiceError::NotLoaded)?;
        match collection.pool_mut(pool_id) {
            Some(pool) => {
                let before = pool.participants.len();
                pool.participants.retain(|p| p.id != participant_id);
                pool.participants.len() != before
            }
            None => false,
        }
    };

    if changed {
        schedule_save(state).await;
    } else {
        debug!(pool = %pool_id, participant = %participant_id, "delete target vanished; ignoring");
    }
    Ok(())
}

/// Append a ledger entry and re-sort the ledger descending by date.
pub async fn add_financial_record(
    state: &SharedState,
    pool_id: Uuid,
    input: FinancialRecordInput,
) -> Result<(), ServiceError> {
    input
        .validate()
        .map_err(|err| invalid("add financial record", err))?;

    let changed = {
        let mut guard = state.collection_cell().write().await;
        let collection = guard.as_mut().ok_or(ServiceError::NotLoaded)?;
        match collection.pool_mut(pool_id) {
            Some(pool) => {
                pool.financial_records.push(FinancialRecord {
                    id: Uuid::new_v4(),
                    date: input.date,
                    kind: input.kind,
                    amount: input.amount,
                    description: input.description,
                });
                pool.financial_records.sort_by(|a, b| b.date.cmp(&a.date));
                true
            }
            None => {
                debug!(pool = %pool_id, "record target pool vanished; ignoring");
                false
            }
        }
    };

    if changed {
        schedule_save(state).await;
    }
    Ok(())
}

/// Remove a ledger entry from a pool.
pub async fn delete_financial_record(
    state: &SharedState,
    pool_id: Uuid,
    record_id: Uuid,
) -> Result<(), ServiceError> {
    let changed = {
        let mut guard = state.collection_cell().write().await;
        let collection = guard.as_mut().ok_or(ServiceError::NotLoaded)?;
        match collection.pool_mut(pool_id) {
            Some(pool) => {
                let before = pool.financial_records.len();
                pool.financial_records.retain(|r| r.id != record_id);
                pool.financial_records.len() != before
            }
            None => false,
        }
    };

    if changed {
        schedule_save(state).await;
    } else {
        debug!(pool = %pool_id, record = %record_id, "delete target vanished; ignoring");
    }
    Ok(())
}

/// Clone a pool's participants for a new pool: fresh ids, payment pending,
/// name, phone, and quotas preserved.
fn carry_over_participants(base: &Pool) -> Vec<Participant> {
    base.participants
        .iter()
        .map(|p| Participant {
            id: Uuid::new_v4(),
            name: p.name.clone(),
            phone: p.phone.clone(),
            quotas: p.quotas,
            status: PaymentStatus::Pending,
        })
        .collect()
}

fn invalid(action: &str, err: ValidationErrors) -> ServiceError {
    ServiceError::InvalidInput(format!("cannot {action}: {err}"))
}

/// Push the current collection to the remote store on a background task.
///
/// Fire and forget: the mutation already applied locally stays applied
/// whatever happens to the request, and saves issued in quick succession are
/// resolved by the store as last writer wins.
async fn schedule_save(state: &SharedState) {
    let Some(collection) = state.collection().await else {
        return;
    };
    let Some(store) = state.store().await else {
        warn!("no document store installed; skipping write-back");
        return;
    };

    let shared = Arc::clone(state);
    tokio::spawn(async move {
        if let Err(err) = store.save(collection).await {
            warn!(error = %err, "failed to push collection to remote store");
            shared.publish_save_error(err.to_string());
        }
    });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use time::macros::date;

    use crate::{
        dao::memory::MemoryDocumentStore,
        state::{
            AppState,
            pool::{Collection, PoolStatus, RecordKind},
            session::Selection,
        },
    };

    use super::*;

    fn create_request(name: &str) -> CreatePoolRequest {
        CreatePoolRequest {
            name: name.into(),
            start_date: date!(2024 - 08 - 01),
            end_date: date!(2024 - 08 - 31),
            quota_value: 20.0,
            status: PoolStatus::Active,
            base_pool_id: None,
        }
    }

    fn participant_input(name: &str, phone: &str) -> ParticipantInput {
        ParticipantInput {
            name: name.into(),
            phone: phone.into(),
            quotas: 1,
            status: PaymentStatus::Pending,
        }
    }

    fn record_input(day: u8, kind: RecordKind, amount: f64) -> FinancialRecordInput {
        FinancialRecordInput {
            date: date!(2024 - 08 - 01).replace_day(day).unwrap(),
            kind,
            amount,
            description: None,
        }
    }

    async fn loaded_state(collection: Collection) -> (crate::state::SharedState, MemoryDocumentStore) {
        let store = MemoryDocumentStore::with_document(collection);
        let state = AppState::new();
        state.bootstrap(Arc::new(store.clone())).await.unwrap();
        (state, store)
    }

    /// Wait until the background save has landed in the memory store.
    async fn wait_for_saved(store: &MemoryDocumentStore, expected: &Collection) {
        for _ in 0..100 {
            if store.document().await == *expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("remote document never caught up with local state");
    }

    #[tokio::test]
    async fn mutations_are_rejected_before_the_initial_load() {
        let state = AppState::new();
        let err = create_pool(&state, create_request("Agosto"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotLoaded));
    }

    #[tokio::test]
    async fn created_pool_is_uppercased_selected_and_saved() {
        let (state, store) = loaded_state(Collection::default()).await;

        let pool = create_pool(&state, create_request("Agosto/2024"))
            .await
            .unwrap();
        assert_eq!(pool.name, "AGOSTO/2024");

        let session = state.session().await;
        assert_eq!(session.selection, Selection::Pool(pool.id));

        let expected = state.collection().await.unwrap();
        wait_for_saved(&store, &expected).await;
    }

    #[tokio::test]
    async fn create_pool_requires_a_name() {
        let (state, _) = loaded_state(Collection::default()).await;
        let err = create_pool(&state, create_request("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(state.collection().await.unwrap().pools.is_empty());
    }

    #[tokio::test]
    async fn base_pool_participants_carry_over_reset_to_pending() {
        let (state, _) = loaded_state(Collection::default()).await;
        let base = create_pool(&state, create_request("Julho")).await.unwrap();
        save_participant(&state, base.id, participant_input("Ana", "11999990000"), None)
            .await
            .unwrap();
        toggle_participant_status(
            &state,
            base.id,
            state.collection().await.unwrap().pools[0].participants[0].id,
        )
        .await
        .unwrap();

        let request = CreatePoolRequest {
            base_pool_id: Some(base.id),
            ..create_request("Agosto")
        };
        let pool = create_pool(&state, request).await.unwrap();

        let collection = state.collection().await.unwrap();
        let original = &collection.pool(base.id).unwrap().participants[0];
        let carried = &collection.pool(pool.id).unwrap().participants[0];
        assert_eq!(original.status, PaymentStatus::Paid);
        assert_eq!(carried.name, "Ana");
        assert_eq!(carried.phone, "11999990000");
        assert_eq!(carried.quotas, original.quotas);
        assert_eq!(carried.status, PaymentStatus::Pending);
        assert_ne!(carried.id, original.id);
    }

    #[tokio::test]
    async fn duplicate_phone_is_rejected_across_formats() {
        let (state, _) = loaded_state(Collection::default()).await;
        let pool = create_pool(&state, create_request("Agosto")).await.unwrap();
        save_participant(&state, pool.id, participant_input("Ana", "11999990000"), None)
            .await
            .unwrap();

        let err = save_participant(
            &state,
            pool.id,
            participant_input("Bia", "(11) 9 9999-0000"),
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::DuplicatePhone));

        let collection = state.collection().await.unwrap();
        assert_eq!(collection.pool(pool.id).unwrap().participants.len(), 1);
    }

    #[tokio::test]
    async fn editing_a_participant_excludes_itself_from_the_phone_check() {
        let (state, _) = loaded_state(Collection::default()).await;
        let pool = create_pool(&state, create_request("Agosto")).await.unwrap();
        save_participant(&state, pool.id, participant_input("Ana", "11999990000"), None)
            .await
            .unwrap();
        let ana = state.collection().await.unwrap().pools[0].participants[0].id;

        let mut edit = participant_input("Ana Maria", "(11) 9 9999-0000");
        edit.quotas = 3;
        save_participant(&state, pool.id, edit, Some(ana)).await.unwrap();

        let collection = state.collection().await.unwrap();
        let participant = collection.pool(pool.id).unwrap().participant(ana).unwrap();
        assert_eq!(participant.name, "Ana Maria");
        assert_eq!(participant.quotas, 3);
    }

    #[tokio::test]
    async fn empty_phones_never_collide() {
        let (state, _) = loaded_state(Collection::default()).await;
        let pool = create_pool(&state, create_request("Agosto")).await.unwrap();
        save_participant(&state, pool.id, participant_input("Ana", ""), None)
            .await
            .unwrap();
        save_participant(&state, pool.id, participant_input("Bia", ""), None)
            .await
            .unwrap();
        let collection = state.collection().await.unwrap();
        assert_eq!(collection.pool(pool.id).unwrap().participants.len(), 2);
    }

    #[tokio::test]
    async fn toggle_round_trips_without_touching_other_fields() {
        let (state, _) = loaded_state(Collection::default()).await;
        let pool = create_pool(&state, create_request("Agosto")).await.unwrap();
        save_participant(&state, pool.id, participant_input("Ana", "11999990000"), None)
            .await
            .unwrap();
        let before = state.collection().await.unwrap().pools[0].participants[0].clone();

        toggle_participant_status(&state, pool.id, before.id).await.unwrap();
        let mid = state.collection().await.unwrap().pools[0].participants[0].clone();
        assert_eq!(mid.status, PaymentStatus::Paid);

        toggle_participant_status(&state, pool.id, before.id).await.unwrap();
        let after = state.collection().await.unwrap().pools[0].participants[0].clone();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn stale_targets_are_silent_no_ops() {
        let (state, _) = loaded_state(Collection::default()).await;
        let pool = create_pool(&state, create_request("Agosto")).await.unwrap();

        toggle_participant_status(&state, pool.id, Uuid::new_v4()).await.unwrap();
        delete_participant(&state, pool.id, Uuid::new_v4()).await.unwrap();
        delete_financial_record(&state, pool.id, Uuid::new_v4()).await.unwrap();
        delete_pool(&state, Uuid::new_v4()).await.unwrap();
        update_pool(
            &state,
            Uuid::new_v4(),
            UpdatePoolRequest {
                name: "Setembro".into(),
                start_date: date!(2024 - 09 - 01),
                end_date: date!(2024 - 09 - 30),
                quota_value: 25.0,
                status: PoolStatus::Active,
            },
        )
        .await
        .unwrap();

        let collection = state.collection().await.unwrap();
        assert_eq!(collection.pools.len(), 1);
        assert_eq!(collection.pools[0].name, "AGOSTO");
    }

    #[tokio::test]
    async fn deleting_a_pool_cascades_and_reselects() {
        let (state, store) = loaded_state(Collection::default()).await;
        let p1 = create_pool(&state, create_request("Julho")).await.unwrap();
        let p2 = create_pool(&state, create_request("Agosto")).await.unwrap();
        save_participant(&state, p2.id, participant_input("Ana", "11999990000"), None)
            .await
            .unwrap();
        add_financial_record(&state, p2.id, record_input(10, RecordKind::Bet, 30.0))
            .await
            .unwrap();

        state.select_pool(p2.id).await;
        delete_pool(&state, p2.id).await.unwrap();

        let collection = state.collection().await.unwrap();
        assert_eq!(collection.pools.len(), 1);
        assert!(collection.pool(p2.id).is_none());
        assert_eq!(state.session().await.selection, Selection::Pool(p1.id));

        delete_pool(&state, p1.id).await.unwrap();
        assert_eq!(state.session().await.selection, Selection::None);

        let expected = state.collection().await.unwrap();
        wait_for_saved(&store, &expected).await;
    }

    #[tokio::test]
    async fn records_are_kept_sorted_descending_by_date() {
        let (state, _) = loaded_state(Collection::default()).await;
        let pool = create_pool(&state, create_request("Agosto")).await.unwrap();

        add_financial_record(&state, pool.id, record_input(5, RecordKind::Bet, 10.0))
            .await
            .unwrap();
        add_financial_record(&state, pool.id, record_input(20, RecordKind::Prize, 50.0))
            .await
            .unwrap();
        add_financial_record(&state, pool.id, record_input(12, RecordKind::Bet, 15.0))
            .await
            .unwrap();

        let collection = state.collection().await.unwrap();
        let dates: Vec<u8> = collection.pool(pool.id).unwrap().financial_records
            .iter()
            .map(|r| r.date.day())
            .collect();
        assert_eq!(dates, vec![20, 12, 5]);
    }

    #[tokio::test]
    async fn update_pool_replaces_fields_but_keeps_identity() {
        let (state, _) = loaded_state(Collection::default()).await;
        let pool = create_pool(&state, create_request("Agosto")).await.unwrap();

        update_pool(
            &state,
            pool.id,
            UpdatePoolRequest {
                name: "Agosto (encerrado)".into(),
                start_date: date!(2024 - 08 - 01),
                end_date: date!(2024 - 08 - 31),
                quota_value: 25.0,
                status: PoolStatus::Closed,
            },
        )
        .await
        .unwrap();

        let collection = state.collection().await.unwrap();
        let updated = collection.pool(pool.id).unwrap();
        assert_eq!(updated.name, "AGOSTO (ENCERRADO)");
        assert_eq!(updated.quota_value, 25.0);
        assert_eq!(updated.status, PoolStatus::Closed);
    }

    #[tokio::test]
    async fn save_failure_keeps_local_state_and_notifies() {
        let (state, store) = loaded_state(Collection::default()).await;
        store.set_fail_saves(true);
        let mut failures = state.save_error_watcher();

        let pool = create_pool(&state, create_request("Agosto")).await.unwrap();

        failures.changed().await.unwrap();
        assert!(failures.borrow().is_some());

        // Local state drifted ahead of the remote document, by design.
        assert!(state.collection().await.unwrap().pool(pool.id).is_some());
        assert!(store.document().await.pools.is_empty());
    }
}
