use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::{repo_types::User, services::Signup};

/// Request body for signup. Not `Debug`: it carries a plaintext password.
#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl From<SignupRequest> for Signup {
    fn from(r: SignupRequest) -> Self {
        Self {
            username: r.username.unwrap_or_default(),
            password: r.password.unwrap_or_default(),
            image_url: r.image_url,
            bio: r.bio,
        }
    }
}

/// Request body for login.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            image_url: u.image_url,
            bio: u.bio,
        }
    }
}
