use crate::entities::prelude::*;
use crate::entities::{assignments, return_requests};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so foreign keys resolve.
        create(manager, &schema, Locations).await?;
        create(manager, &schema, Roles).await?;
        create(manager, &schema, Users).await?;
        create(manager, &schema, Categories).await?;
        create(manager, &schema, Assets).await?;
        create(manager, &schema, Assignments).await?;
        create(manager, &schema, ReturnRequests).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_asset_state")
                    .table(Assignments)
                    .col(assignments::Column::AssetId)
                    .col(assignments::Column::State)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_return_requests_assignment")
                    .table(ReturnRequests)
                    .col(return_requests::Column::AssignmentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReturnRequests).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assets).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locations).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

async fn create<E>(manager: &SchemaManager<'_>, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .create_table(schema.create_table_from_entity(entity).if_not_exists().to_owned())
        .await
}
