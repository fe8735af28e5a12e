use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    sea_query::OnConflict,
};

use crate::{
    db,
    entities::{cart_line, genre, genre_poster_rel, poster, user, user_rating},
    error::SeedResult,
    models::{CartLineRecord, GenrePosterRecord, GenreRecord, PosterRecord, RatingRecord},
};

/// Handle to the shop database used by the seeder. Every write is a
/// create-or-noop: existing rows are never updated.
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub async fn connect(database_url: &str) -> SeedResult<Self> {
        let db = db::connect_and_migrate(database_url).await?;
        Ok(Self { db })
    }

    #[cfg(test)]
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn close(self) -> Result<(), DbErr> {
        self.db.close().await
    }

    /// Inserts users, skipping any whose email is already taken. Returns the
    /// number of rows actually inserted.
    pub async fn insert_users_skip_duplicates(
        &self,
        users: Vec<user::ActiveModel>,
    ) -> Result<u64, DbErr> {
        if users.is_empty() {
            return Ok(0);
        }

        user::Entity::insert_many(users)
            .on_conflict(OnConflict::column(user::Column::Email).do_nothing().to_owned())
            .exec_without_returning(&self.db)
            .await
    }

    /// Returns `true` when the genre was created, `false` when the id existed.
    pub async fn upsert_genre(&self, record: &GenreRecord) -> Result<bool, DbErr> {
        let now = now_sec();
        let model = genre::ActiveModel {
            id: Set(record.id),
            title: Set(record.title.clone()),
            slug: Set(record.slug.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = genre::Entity::insert(model)
            .on_conflict(OnConflict::column(genre::Column::Id).do_nothing().to_owned())
            .exec_without_returning(&self.db)
            .await?;

        Ok(inserted > 0)
    }

    pub async fn find_poster_by_slug(&self, slug: &str) -> Result<Option<poster::Model>, DbErr> {
        poster::Entity::find().filter(poster::Column::Slug.eq(slug)).one(&self.db).await
    }

    pub async fn upsert_poster(&self, record: &PosterRecord, slug: &str) -> Result<bool, DbErr> {
        let now = now_sec();
        let model = poster::ActiveModel {
            id: Set(record.id),
            name: Set(record.name.clone()),
            slug: Set(slug.to_string()),
            description: Set(record.description.clone()),
            image: Set(record.image.clone()),
            width: Set(record.width),
            height: Set(record.height),
            price: Set(record.price),
            stock: Set(record.stock),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = poster::Entity::insert(model)
            .on_conflict(OnConflict::column(poster::Column::Id).do_nothing().to_owned())
            .exec_without_returning(&self.db)
            .await?;

        Ok(inserted > 0)
    }

    pub async fn upsert_genre_poster(&self, record: &GenrePosterRecord) -> Result<bool, DbErr> {
        let model = genre_poster_rel::ActiveModel {
            genre_id: Set(record.genre_id),
            poster_id: Set(record.poster_id),
        };

        let inserted = genre_poster_rel::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    genre_poster_rel::Column::GenreId,
                    genre_poster_rel::Column::PosterId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(inserted > 0)
    }

    pub async fn create_cart_line(&self, record: &CartLineRecord) -> Result<i32, DbErr> {
        let now = now_sec();
        let model = cart_line::ActiveModel {
            id: NotSet,
            user_id: Set(record.user_id),
            poster_id: Set(record.poster_id),
            quantity: Set(record.quantity),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = cart_line::Entity::insert(model).exec(&self.db).await?;
        Ok(result.last_insert_id)
    }

    pub async fn create_rating(&self, record: &RatingRecord) -> Result<i32, DbErr> {
        let now = now_sec();
        let model = user_rating::ActiveModel {
            id: NotSet,
            user_id: Set(record.user_id),
            poster_id: Set(record.poster_id),
            num_stars: Set(record.num_stars),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = user_rating::Entity::insert(model).exec(&self.db).await?;
        Ok(result.last_insert_id)
    }
}

pub(crate) fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}
