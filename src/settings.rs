//! The singleton fundraiser settings row: goal and bio.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use serde_json::Value;

use crate::entities::{fundraiser_settings, FundraiserSettings};
use crate::error::AppError;

pub const DEFAULT_GOAL: i64 = 3500;
pub const SETTINGS_ROW_ID: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub goal: i64,
    pub bio: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            goal: DEFAULT_GOAL,
            bio: String::new(),
        }
    }
}

impl From<fundraiser_settings::Model> for Settings {
    fn from(row: fundraiser_settings::Model) -> Self {
        Self {
            goal: row.goal,
            bio: row.bio,
        }
    }
}

/// Partial update; `None` leaves the stored value alone.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub goal: Option<i64>,
    pub bio: Option<String>,
}

/// Insert the default row if it is missing. Called once at startup.
pub async fn ensure_settings<C: ConnectionTrait>(db: &C) -> Result<(), AppError> {
    if FundraiserSettings::find_by_id(SETTINGS_ROW_ID).one(db).await?.is_some() {
        return Ok(());
    }

    let defaults = Settings::default();
    fundraiser_settings::ActiveModel {
        id: Set(SETTINGS_ROW_ID),
        goal: Set(defaults.goal),
        bio: Set(defaults.bio),
        updated_at: Set(Utc::now()),
    }
    .insert(db)
    .await?;

    tracing::info!(goal = DEFAULT_GOAL, "Created default fundraiser settings");
    Ok(())
}

/// Current settings, or the defaults when the row does not exist.
pub async fn load_settings<C: ConnectionTrait>(db: &C) -> Result<Settings, AppError> {
    Ok(FundraiserSettings::find_by_id(SETTINGS_ROW_ID)
        .one(db)
        .await?
        .map(Settings::from)
        .unwrap_or_default())
}

pub async fn update_settings<C: ConnectionTrait>(
    db: &C,
    update: SettingsUpdate,
) -> Result<Settings, AppError> {
    let existing = FundraiserSettings::find_by_id(SETTINGS_ROW_ID).one(db).await?;

    let saved = match existing {
        Some(row) => {
            let mut active: fundraiser_settings::ActiveModel = row.into();
            if let Some(goal) = update.goal {
                active.goal = Set(goal);
            }
            if let Some(bio) = update.bio {
                active.bio = Set(bio);
            }
            active.updated_at = Set(Utc::now());
            active.update(db).await?
        }
        None => {
            let defaults = Settings::default();
            fundraiser_settings::ActiveModel {
                id: Set(SETTINGS_ROW_ID),
                goal: Set(update.goal.unwrap_or(defaults.goal)),
                bio: Set(update.bio.unwrap_or(defaults.bio)),
                updated_at: Set(Utc::now()),
            }
            .insert(db)
            .await?
        }
    };

    Ok(saved.into())
}

/// Put goal and bio back to their defaults. Donation records are not touched.
pub async fn reset_settings<C: ConnectionTrait>(db: &C) -> Result<Settings, AppError> {
    let defaults = Settings::default();
    update_settings(
        db,
        SettingsUpdate {
            goal: Some(defaults.goal),
            bio: Some(defaults.bio),
        },
    )
    .await
}

/// Interpret an admin-supplied goal. Integers and numeric strings are
/// accepted; anything else (or a non-positive value) becomes `DEFAULT_GOAL`.
pub fn parse_goal(raw: &Value) -> i64 {
    let parsed = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match parsed {
        Some(goal) if goal > 0 => goal,
        _ => {
            tracing::debug!(value = %raw, "Unparsable goal, using default");
            DEFAULT_GOAL
        }
    }
}
