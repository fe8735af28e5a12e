use sea_orm::{ActiveValue::NotSet, Set};

use crate::{
    entities::user::{self, Role},
    error::SeedResult,
    store::now_sec,
};

const SYNTHETIC_USERS: std::ops::RangeInclusive<u32> = 100..=199;
const EMAIL_DOMAIN: &str = "wallywood.dk";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedUser {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub role: Role,
}

impl SeedUser {
    fn new(firstname: impl Into<String>, lastname: &str, local_part: &str, role: Role) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.to_string(),
            email: format!("{local_part}@{EMAIL_DOMAIN}"),
            role,
        }
    }

    pub fn into_active_model(self, password_hash: &str) -> user::ActiveModel {
        let now = now_sec();
        user::ActiveModel {
            id: NotSet,
            firstname: Set(self.firstname),
            lastname: Set(self.lastname),
            email: Set(self.email),
            password: Set(password_hash.to_string()),
            role: Set(self.role),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// The fixed admin and regular accounts followed by the numbered test users.
pub fn seed_users() -> Vec<SeedUser> {
    let mut users = vec![
        SeedUser::new("Admin", "User", "admin", Role::Admin),
        SeedUser::new("Regular", "User", "user", Role::User),
    ];
    users.extend(SYNTHETIC_USERS.map(|n| {
        SeedUser::new(format!("User{n}"), "Test", &format!("user{n}"), Role::User)
    }));
    users
}

/// Hashes on the blocking pool.
pub async fn hash_password(password: &str, cost: u32) -> SeedResult<String> {
    let password = password.to_string();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}
