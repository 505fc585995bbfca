use core::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Access roles. Route guards check set-membership against these values;
/// there is no ordered privilege hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Visitor,
    Organizer,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Admin => "admin",
            UserRole::Visitor => "visitor",
            UserRole::Organizer => "organizer",
        };
        write!(f, "{}", s)
    }
}

/// A registered account. The login pair (email + password hash) is stored
/// inline on the row; the hash never serializes into responses.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub profile_pick: Option<String>,
    pub role: UserRole,
}

/// Column values for inserting or replacing a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_pick: Option<String>,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_never_serializes() {
        let user = User {
            id: Uuid::new_v4(),
            name: "A".into(),
            email: "a@b.com".into(),
            password_hash: "$argon2id$secret".into(),
            profile_pick: None,
            role: UserRole::Visitor,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["role"], "visitor");
    }
}
