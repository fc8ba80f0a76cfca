use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reviews::SpotId).string().not_null())
                    .col(ColumnDef::new(Reviews::UserId).string().not_null())
                    .col(ColumnDef::new(Reviews::UserName).string().not_null())
                    .col(ColumnDef::new(Reviews::UserPhotoUrl).string())
                    .col(ColumnDef::new(Reviews::Text).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Reviews::Rating)
                            .string()
                            .not_null()
                            .default("none"),
                    )
                    .col(ColumnDef::new(Reviews::VoteOwner).string())
                    .col(ColumnDef::new(Reviews::CreatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_spot")
                    .table(Reviews::Table)
                    .col(Reviews::SpotId)
                    .to_owned(),
            )
            .await?;

        // NULL vote_owner values never collide, so comments are unconstrained.
        manager
            .create_index(
                Index::create()
                    .name("ux_reviews_spot_vote_owner")
                    .table(Reviews::Table)
                    .col(Reviews::SpotId)
                    .col(Reviews::VoteOwner)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    SpotId,
    UserId,
    UserName,
    UserPhotoUrl,
    Text,
    Rating,
    VoteOwner,
    CreatedAt,
}
