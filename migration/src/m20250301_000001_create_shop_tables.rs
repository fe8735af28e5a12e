use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string(User::Firstname))
                    .col(string(User::Lastname))
                    .col(string_uniq(User::Email))
                    .col(string(User::Password))
                    .col(string(User::Role).default("USER"))
                    .col(boolean(User::IsActive).default(true))
                    .col(big_integer(User::CreatedAt))
                    .col(big_integer(User::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Genre::Table)
                    .if_not_exists()
                    .col(pk_auto(Genre::Id))
                    .col(string(Genre::Title))
                    .col(string_uniq(Genre::Slug))
                    .col(big_integer(Genre::CreatedAt))
                    .col(big_integer(Genre::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Poster::Table)
                    .if_not_exists()
                    .col(pk_auto(Poster::Id))
                    .col(string(Poster::Name))
                    .col(string_uniq(Poster::Slug))
                    .col(text_null(Poster::Description))
                    .col(string(Poster::Image))
                    .col(integer(Poster::Width).default(70))
                    .col(integer(Poster::Height).default(100))
                    .col(double(Poster::Price).default(50.0))
                    .col(integer(Poster::Stock).default(0))
                    .col(big_integer(Poster::CreatedAt))
                    .col(big_integer(Poster::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GenrePosterRel::Table)
                    .if_not_exists()
                    .col(integer(GenrePosterRel::GenreId))
                    .col(integer(GenrePosterRel::PosterId))
                    .primary_key(
                        Index::create()
                            .col(GenrePosterRel::GenreId)
                            .col(GenrePosterRel::PosterId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_genre_poster_rel_genre")
                            .from(GenrePosterRel::Table, GenrePosterRel::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_genre_poster_rel_poster")
                            .from(GenrePosterRel::Table, GenrePosterRel::PosterId)
                            .to(Poster::Table, Poster::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CartLine::Table)
                    .if_not_exists()
                    .col(pk_auto(CartLine::Id))
                    .col(integer(CartLine::UserId))
                    .col(integer(CartLine::PosterId))
                    .col(integer(CartLine::Quantity))
                    .col(big_integer(CartLine::CreatedAt))
                    .col(big_integer(CartLine::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_line_user")
                            .from(CartLine::Table, CartLine::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_line_poster")
                            .from(CartLine::Table, CartLine::PosterId)
                            .to(Poster::Table, Poster::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRating::Table)
                    .if_not_exists()
                    .col(pk_auto(UserRating::Id))
                    .col(integer(UserRating::UserId))
                    .col(integer(UserRating::PosterId))
                    .col(integer(UserRating::NumStars))
                    .col(big_integer(UserRating::CreatedAt))
                    .col(big_integer(UserRating::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_rating_user")
                            .from(UserRating::Table, UserRating::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_rating_poster")
                            .from(UserRating::Table, UserRating::PosterId)
                            .to(Poster::Table, Poster::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserRating::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(CartLine::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(GenrePosterRel::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Poster::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genre::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Firstname,
    Lastname,
    Email,
    Password,
    Role,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Genre {
    Table,
    Id,
    Title,
    Slug,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Poster {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Image,
    Width,
    Height,
    Price,
    Stock,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GenrePosterRel {
    Table,
    GenreId,
    PosterId,
}

#[derive(DeriveIden)]
enum CartLine {
    Table,
    Id,
    UserId,
    PosterId,
    Quantity,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserRating {
    Table,
    Id,
    UserId,
    PosterId,
    NumStars,
    CreatedAt,
    UpdatedAt,
}
