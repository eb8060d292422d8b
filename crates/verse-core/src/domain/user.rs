use serde::{Deserialize, Serialize};

/// User entity - an author who can appear on posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// The fixed set of users known to the site, with one designated admin.
///
/// Built once at startup and shared by handle; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
    admin_id: String,
}

impl UserDirectory {
    pub fn new(users: Vec<User>, admin_id: impl Into<String>) -> Self {
        Self {
            users,
            admin_id: admin_id.into(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        !user_id.is_empty() && user_id == self.admin_id
    }

    pub fn admin(&self) -> Option<&User> {
        self.find(&self.admin_id)
    }
}
