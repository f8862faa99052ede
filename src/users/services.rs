use tracing::{debug, warn};
use uuid::Uuid;

use super::{
    password::PasswordDigest,
    repo::{InsertUserError, UserStore},
    repo_types::{NewUser, User},
};
use crate::error::ApiError;

pub const USERNAME_BLANK: &str = "Username can't be blank";
pub const USERNAME_TAKEN: &str = "Username has already been taken";
pub const PASSWORD_BLANK: &str = "Password can't be blank";

/// Signup fields after JSON decoding; missing strings arrive as empty.
#[derive(Default)]
pub struct Signup {
    pub username: String,
    pub password: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

pub async fn create(users: &dyn UserStore, signup: Signup) -> Result<User, ApiError> {
    let mut errors = Vec::new();
    if signup.username.trim().is_empty() {
        errors.push(USERNAME_BLANK.to_string());
    }
    if signup.password.is_empty() {
        errors.push(PASSWORD_BLANK.to_string());
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    if users.find_by_username(&signup.username).await?.is_some() {
        return Err(ApiError::validation(USERNAME_TAKEN));
    }

    let new_user = NewUser {
        id: Uuid::new_v4(),
        username: signup.username,
        password_digest: PasswordDigest::set(&signup.password)?,
        image_url: signup.image_url,
        bio: signup.bio,
    };

    match users.insert(new_user).await {
        Ok(user) => Ok(user),
        // lost a race with a concurrent signup
        Err(InsertUserError::UsernameTaken) => Err(ApiError::validation(USERNAME_TAKEN)),
        Err(InsertUserError::Other(e)) => Err(e.into()),
    }
}

/// Returns `None` for an unknown username or a wrong password alike.
pub async fn authenticate(
    users: &dyn UserStore,
    username: &str,
    password: &str,
) -> anyhow::Result<Option<User>> {
    let Some(user) = users.find_by_username(username).await? else {
        debug!("authenticate unknown username");
        return Ok(None);
    };
    if !user.password_digest.verify(password) {
        warn!(user_id = %user.id, "authenticate invalid password");
        return Ok(None);
    }
    Ok(Some(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo::MemoryUserStore;

    fn signup(username: &str, password: &str) -> Signup {
        Signup {
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_persists_user_with_digest() {
        let store = MemoryUserStore::default();
        let user = create(
            &store,
            Signup {
                username: "newuser".into(),
                password: "newpassword".into(),
                image_url: Some("http://example.com/image.png".into()),
                bio: Some("A test user".into()),
            },
        )
        .await
        .unwrap();

        assert_eq!(user.username, "newuser");
        assert_eq!(user.bio.as_deref(), Some("A test user"));
        assert!(user.password_digest.verify("newpassword"));

        let found = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.username, "newuser");
    }

    #[tokio::test]
    async fn create_rejects_blank_fields() {
        let store = MemoryUserStore::default();
        match create(&store, signup("", "")).await {
            Err(ApiError::Validation(errors)) => {
                assert_eq!(errors, vec![USERNAME_BLANK.to_string(), PASSWORD_BLANK.to_string()]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        match create(&store, signup("   ", "pw")).await {
            Err(ApiError::Validation(errors)) => assert_eq!(errors, vec![USERNAME_BLANK]),
            other => panic!("expected validation error, got {:?}", other),
        }

        match create(&store, signup("someone", "")).await {
            Err(ApiError::Validation(errors)) => assert_eq!(errors, vec![PASSWORD_BLANK]),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_username() {
        let store = MemoryUserStore::default();
        create(&store, signup("taken", "first")).await.unwrap();
        match create(&store, signup("taken", "second")).await {
            Err(ApiError::Validation(errors)) => assert_eq!(errors, vec![USERNAME_TAKEN]),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    /// Sees no existing user but loses the insert to a concurrent signup.
    struct RacingUserStore;

    #[async_trait::async_trait]
    impl UserStore for RacingUserStore {
        async fn insert(&self, _user: NewUser) -> Result<User, InsertUserError> {
            Err(InsertUserError::UsernameTaken)
        }

        async fn find_by_id(&self, _id: Uuid) -> anyhow::Result<Option<User>> {
            Ok(None)
        }

        async fn find_by_username(&self, _username: &str) -> anyhow::Result<Option<User>> {
            Ok(None)
        }

        async fn delete(&self, _id: Uuid) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn create_maps_lost_insert_race_to_taken() {
        match create(&RacingUserStore, signup("racer", "pw")).await {
            Err(ApiError::Validation(errors)) => assert_eq!(errors, vec![USERNAME_TAKEN]),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn authenticate_checks_password() {
        let store = MemoryUserStore::default();
        let user = create(&store, signup("loginuser", "loginpassword")).await.unwrap();

        let ok = authenticate(&store, "loginuser", "loginpassword").await.unwrap();
        assert_eq!(ok.map(|u| u.id), Some(user.id));

        assert!(authenticate(&store, "loginuser", "badpassword").await.unwrap().is_none());
        assert!(authenticate(&store, "nouser", "loginpassword").await.unwrap().is_none());
    }
}
