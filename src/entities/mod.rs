pub mod cart_line;
pub mod genre;
pub mod genre_poster_rel;
pub mod poster;
pub mod user;
pub mod user_rating;
