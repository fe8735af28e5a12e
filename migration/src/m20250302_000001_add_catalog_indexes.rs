use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_genre_poster_rel_poster")
                    .table(GenrePosterRel::Table)
                    .col(GenrePosterRel::PosterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cart_line_user")
                    .table(CartLine::Table)
                    .col(CartLine::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_rating_poster")
                    .table(UserRating::Table)
                    .col(UserRating::PosterId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop().name("idx_user_rating_poster").table(UserRating::Table).to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_cart_line_user").table(CartLine::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_genre_poster_rel_poster")
                    .table(GenrePosterRel::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum GenrePosterRel {
    Table,
    PosterId,
}

#[derive(DeriveIden)]
enum CartLine {
    Table,
    UserId,
}

#[derive(DeriveIden)]
enum UserRating {
    Table,
    PosterId,
}
