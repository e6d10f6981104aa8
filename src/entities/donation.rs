use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// One completed pledge in the ledger. Rows are only ever inserted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    pub amount: i64,
    #[sea_orm(column_type = "Json")]
    pub numbers: Json, // Sorted JSON array of slot numbers
    pub method: String,
    pub donor_name: String,
    pub donor_phone: String,
    pub donor_address: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::claimed_number::Entity")]
    ClaimedNumber,
}

impl Related<super::claimed_number::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClaimedNumber.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Slot numbers held by this donation. Entries that are not integers are
    /// skipped, which only happens if the row was edited by hand.
    pub fn number_list(&self) -> Vec<i32> {
        self.numbers
            .as_array()
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_i64())
                    .filter_map(|n| i32::try_from(n).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}
