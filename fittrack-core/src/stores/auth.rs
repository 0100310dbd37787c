use crate::error::StoreError;
use crate::models::User;
use crate::storage::{keys, save_json, KeyValueStore};

use super::load_or_warn;

/// Holds the signed-in user.
///
/// Credentials are accepted as given; nothing is verified and no token is kept.
pub struct AuthStore<S> {
    storage: S,
    user: Option<User>,
}

impl<S: KeyValueStore> AuthStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            user: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Signs in with an email. The display name is the part before `@`.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, StoreError> {
        let email = validate_email(email)?;
        validate_password(password)?;

        let name = email.split('@').next().unwrap_or(email);
        self.persist(User::new("1", email, name)).await
    }

    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<&User, StoreError> {
        let email = validate_email(email)?;
        validate_password(password)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::validation("Name is required"));
        }

        self.persist(User::new("1", email, name)).await
    }

    pub async fn login_as_guest(&mut self) -> Result<&User, StoreError> {
        self.persist(User::guest()).await
    }

    pub async fn logout(&mut self) -> Result<(), StoreError> {
        self.storage.remove(keys::USER).await?;
        self.user = None;
        tracing::debug!("Signed out");
        Ok(())
    }

    /// Restores a previously persisted user, if any.
    pub async fn load_user(&mut self) {
        if let Some(user) = load_or_warn::<User, _>(&self.storage, keys::USER).await {
            self.user = Some(user);
        }
    }

    /// Changes the display name and/or email of the signed-in user.
    pub async fn update_profile(
        &mut self,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<&User, StoreError> {
        let mut user = self.user.clone().ok_or(StoreError::NotAuthenticated)?;

        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(StoreError::validation("Name cannot be empty"));
            }
            user.name = name.to_string();
        }
        if let Some(email) = email {
            user.email = validate_email(email)?.to_string();
        }

        self.persist(user).await
    }

    async fn persist(&mut self, user: User) -> Result<&User, StoreError> {
        save_json(&self.storage, keys::USER, &user).await?;
        tracing::debug!("Signed in as {} (guest: {})", user.email, user.is_guest);
        Ok(self.user.insert(user))
    }
}

fn validate_email(email: &str) -> Result<&str, StoreError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') || email.starts_with('@') {
        return Err(StoreError::validation(format!(
            "Invalid email address '{}'",
            email
        )));
    }
    Ok(email)
}

fn validate_password(password: &str) -> Result<(), StoreError> {
    if password.is_empty() {
        return Err(StoreError::validation("Password is required"));
    }
    Ok(())
}
