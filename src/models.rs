use crate::{csv::Row, error::RowError, slug::generate_slug};

pub const DEFAULT_POSTER_NAME: &str = "Unknown Poster";
pub const DEFAULT_POSTER_IMAGE: &str = "placeholder.jpg";
pub const DEFAULT_WIDTH: i32 = 70;
pub const DEFAULT_HEIGHT: i32 = 100;
pub const DEFAULT_PRICE: f64 = 50.0;

#[derive(Clone, Debug, PartialEq)]
pub struct GenreRecord {
    pub id: i32,
    pub title: String,
    pub slug: String,
}

impl GenreRecord {
    pub fn from_row(row: &Row) -> Result<Self, RowError> {
        Ok(Self {
            id: required_i32(row, "id")?,
            title: required_text(row, "title")?,
            slug: required_text(row, "slug")?,
        })
    }
}

/// A poster with defaults applied. `slug` is the candidate slug; it may still
/// be disambiguated against the store before insert.
#[derive(Clone, Debug, PartialEq)]
pub struct PosterRecord {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: String,
    pub width: i32,
    pub height: i32,
    pub price: f64,
    pub stock: i32,
}

impl PosterRecord {
    pub fn from_row(row: &Row) -> Result<Self, RowError> {
        let id = required_i32(row, "id")?;
        let name = row.text("name");

        let slug = match row.text("slug").map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => generate_slug(name, Some(i64::from(id))),
        };

        // Zero counts as missing for the dimension and price columns.
        let width = optional_i32(row, "width")?.filter(|w| *w != 0).unwrap_or(DEFAULT_WIDTH);
        let height = optional_i32(row, "height")?.filter(|h| *h != 0).unwrap_or(DEFAULT_HEIGHT);
        let price = row.float("price").filter(|p| *p != 0.0).unwrap_or(DEFAULT_PRICE);

        Ok(Self {
            id,
            name: name.unwrap_or(DEFAULT_POSTER_NAME).to_string(),
            slug,
            description: row.text("description").map(str::to_string),
            image: row.text("image").unwrap_or(DEFAULT_POSTER_IMAGE).to_string(),
            width,
            height,
            price,
            stock: optional_i32(row, "stock")?.unwrap_or(0),
        })
    }

    /// Slug used when the candidate already belongs to another poster.
    pub fn disambiguated_slug(&self) -> String {
        format!("{}-{}", self.slug, self.id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenrePosterRecord {
    pub genre_id: i32,
    pub poster_id: i32,
}

impl GenrePosterRecord {
    pub fn from_row(row: &Row) -> Result<Self, RowError> {
        Ok(Self {
            genre_id: required_i32(row, "genreId")?,
            poster_id: required_i32(row, "posterId")?,
        })
    }
}

// Cart line and rating exports use `UserID`-style headers, unlike the
// catalog files.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CartLineRecord {
    pub user_id: i32,
    pub poster_id: i32,
    pub quantity: i32,
}

impl CartLineRecord {
    pub fn from_row(row: &Row) -> Result<Self, RowError> {
        Ok(Self {
            user_id: required_i32(row, "UserID")?,
            poster_id: required_i32(row, "PosterID")?,
            quantity: required_i32(row, "Quantity")?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RatingRecord {
    pub user_id: i32,
    pub poster_id: i32,
    pub num_stars: i32,
}

impl RatingRecord {
    pub fn from_row(row: &Row) -> Result<Self, RowError> {
        Ok(Self {
            user_id: required_i32(row, "UserID")?,
            poster_id: required_i32(row, "PosterID")?,
            num_stars: required_i32(row, "Rating")?,
        })
    }
}

fn required_i32(row: &Row, field: &'static str) -> Result<i32, RowError> {
    optional_i32(row, field)?.ok_or(RowError::Field(field))
}

fn optional_i32(row: &Row, field: &'static str) -> Result<Option<i32>, RowError> {
    row.int(field)
        .map(|value| i32::try_from(value).map_err(|_| RowError::OutOfRange { field, value }))
        .transpose()
}

fn required_text(row: &Row, field: &'static str) -> Result<String, RowError> {
    row.text(field).map(str::to_string).ok_or(RowError::Field(field))
}
