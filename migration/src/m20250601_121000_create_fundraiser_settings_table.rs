use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FundraiserSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FundraiserSettings::Id)
                            .integer() // Singleton row, always 1
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FundraiserSettings::Goal).big_integer().not_null())
                    .col(ColumnDef::new(FundraiserSettings::Bio).text().not_null())
                    .col(
                        ColumnDef::new(FundraiserSettings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FundraiserSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FundraiserSettings {
    Table,
    Id,
    Goal,
    Bio,
    UpdatedAt,
}
