use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GaugeMetrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GaugeMetrics::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GaugeMetrics::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(GaugeMetrics::Value).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CounterMetrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CounterMetrics::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CounterMetrics::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(CounterMetrics::Value)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CounterMetrics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GaugeMetrics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GaugeMetrics {
    #[sea_orm(iden = "gaugemetrics")]
    Table,
    Id,
    Name,
    Value,
}

#[derive(DeriveIden)]
enum CounterMetrics {
    #[sea_orm(iden = "countermetrics")]
    Table,
    Id,
    Name,
    Value,
}
