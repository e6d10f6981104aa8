//! The donation ledger: aggregate progress and conflict-checked inserts.
//!
//! Every claimed slot also gets a row in `claimed_numbers`, whose primary key
//! is the slot number. Inserting the donation and its claims happens in one
//! transaction, so two donations can never end up holding the same slot even
//! when requests race past the overlap check. Within one process, writers
//! also take the `claim_lock` so SQLite never sees two write transactions at
//! once; the constraint still covers several instances sharing one database.

use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use serde::Serialize;
use tokio::sync::Mutex;
use utoipa::ToSchema;

use crate::entities::{claimed_number, donation, ClaimedNumber, Donation};
use crate::error::AppError;
use crate::settings::load_settings;
use crate::validation::NewDonation;

/// Aggregate progress returned by `GET /api/state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FundraiserState {
    /// Sum of all donation amounts
    pub raised: i64,
    /// Number of donation records
    pub donation_count: u64,
    /// Target amount
    pub goal: i64,
    /// Free-text bio shown above the grid
    pub bio: String,
    /// Every slot held by some donation, ascending
    pub taken_numbers: Vec<i32>,
}

pub async fn fetch_state(db: &DatabaseConnection) -> Result<FundraiserState, AppError> {
    let donations = Donation::find().all(db).await?;
    let settings = load_settings(db).await?;

    let raised = total_raised(&donations)?;
    let taken: BTreeSet<i32> = donations.iter().flat_map(|d| d.number_list()).collect();

    Ok(FundraiserState {
        raised,
        donation_count: donations.len() as u64,
        goal: settings.goal,
        bio: settings.bio,
        taken_numbers: taken.into_iter().collect(),
    })
}

/// Sum of every donation amount. Rows written outside the API are not
/// bound by the amount cap, so the sum is checked.
pub fn total_raised(donations: &[donation::Model]) -> Result<i64, AppError> {
    donations.iter().try_fold(0i64, |total, d| {
        total.checked_add(d.amount).ok_or_else(|| {
            AppError::InternalError(format!("raised total overflows at donation {}", d.id))
        })
    })
}

/// Subset of `numbers` already held by a stored donation, ascending.
pub async fn claimed_overlap<C: ConnectionTrait>(
    db: &C,
    numbers: &[i32],
) -> Result<Vec<i32>, AppError> {
    let mut overlap: Vec<i32> = ClaimedNumber::find()
        .filter(claimed_number::Column::Number.is_in(numbers.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|claim| claim.number)
        .collect();
    overlap.sort_unstable();
    Ok(overlap)
}

/// Insert one `claimed_numbers` row per number for `donation_id`.
///
/// A number that is already claimed violates the primary key and comes back
/// as `AppError::Conflict` carrying the submitted numbers.
pub async fn claim_numbers<C: ConnectionTrait>(
    db: &C,
    donation_id: i64,
    numbers: &[i32],
) -> Result<(), AppError> {
    let claims = numbers.iter().map(|&number| claimed_number::ActiveModel {
        number: Set(number),
        donation_id: Set(donation_id),
    });

    match ClaimedNumber::insert_many(claims).exec(db).await {
        Ok(_) => Ok(()),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(AppError::Conflict(numbers.to_vec()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Append a donation to the ledger unless one of its numbers is taken.
#[tracing::instrument(skip(db, claim_lock, new), fields(numbers = ?new.numbers, method = %new.method))]
pub async fn record_donation(
    db: &DatabaseConnection,
    claim_lock: &Mutex<()>,
    new: NewDonation,
) -> Result<donation::Model, AppError> {
    let _writer = claim_lock.lock().await;
    let txn = db.begin().await?;

    let overlap = claimed_overlap(&txn, &new.numbers).await?;
    if !overlap.is_empty() {
        tracing::info!(conflicts = ?overlap, "Rejected donation, numbers already claimed");
        txn.rollback().await?;
        return Err(AppError::Conflict(overlap));
    }

    let saved = donation::ActiveModel {
        amount: Set(new.amount),
        numbers: Set(serde_json::to_value(&new.numbers)?),
        method: Set(new.method.as_str().to_string()),
        donor_name: Set(new.donor_name),
        donor_phone: Set(new.donor_phone),
        donor_address: Set(new.donor_address),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    match claim_numbers(&txn, saved.id, &new.numbers).await {
        Ok(()) => {}
        Err(AppError::Conflict(submitted)) => {
            // Another instance claimed one of our numbers between the
            // overlap check and the insert
            txn.rollback().await?;
            let overlap = claimed_overlap(db, &submitted).await?;
            tracing::info!(conflicts = ?overlap, "Lost claim race, rejecting donation");
            let conflicts = if overlap.is_empty() { submitted } else { overlap };
            return Err(AppError::Conflict(conflicts));
        }
        Err(e) => return Err(e),
    }

    txn.commit().await?;

    tracing::info!(id = saved.id, amount = saved.amount, "Recorded donation");
    Ok(saved)
}

/// Every donation, oldest first.
pub async fn list_donations(db: &DatabaseConnection) -> Result<Vec<donation::Model>, AppError> {
    Ok(Donation::find()
        .order_by_asc(donation::Column::Id)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored(id: i64, amount: i64) -> donation::Model {
        donation::Model {
            id,
            amount,
            numbers: json!([id]),
            method: "venmo".to_string(),
            donor_name: "A".to_string(),
            donor_phone: "1".to_string(),
            donor_address: "X".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_total_raised_sums_amounts() {
        assert_eq!(total_raised(&[]).unwrap(), 0);
        assert_eq!(total_raised(&[stored(1, 10), stored(2, 32)]).unwrap(), 42);
    }

    #[test]
    fn test_total_raised_reports_overflow() {
        let err = total_raised(&[stored(1, i64::MAX), stored(2, i64::MAX)]).unwrap_err();
        assert!(matches!(err, AppError::InternalError(ref msg) if msg.contains("donation 2")));
    }
}
