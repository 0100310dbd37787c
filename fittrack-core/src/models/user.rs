use serde::{Deserialize, Serialize};

/// The signed-in user. There is no password or token stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub is_guest: bool,
}

impl User {
    pub const GUEST_ID: &'static str = "guest";
    pub const GUEST_EMAIL: &'static str = "guest@fittrack.com";
    pub const GUEST_NAME: &'static str = "Guest User";

    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            avatar: None,
            is_guest: false,
        }
    }

    pub fn guest() -> Self {
        Self {
            is_guest: true,
            ..Self::new(Self::GUEST_ID, Self::GUEST_EMAIL, Self::GUEST_NAME)
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}
