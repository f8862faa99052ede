use sqlx::FromRow;
use uuid::Uuid;

use super::password::PasswordDigest;

/// User record.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_digest: PasswordDigest,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

/// Validated user waiting to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub password_digest: PasswordDigest,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, FromRow)]
pub(super) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_digest: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            username: r.username,
            password_digest: PasswordDigest::from_stored(r.password_digest),
            image_url: r.image_url,
            bio: r.bio,
        }
    }
}

impl From<NewUser> for User {
    fn from(n: NewUser) -> Self {
        Self {
            id: n.id,
            username: n.username,
            password_digest: n.password_digest,
            image_url: n.image_url,
            bio: n.bio,
        }
    }
}
