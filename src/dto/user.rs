use serde::{Deserialize, Serialize};

use crate::models::user::UserRole;
use crate::utils::validate::{
    check_member, check_nested, require_string, ValidateBody, Violations,
};

/// Registration / profile-update body. Admins are seeded, never registered,
/// so the accepted roles stop at organizer and visitor.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPayload {
    pub name: Option<String>,
    pub user_login: Option<LoginPayload>,
    pub profile_pick: Option<String>,
    pub role: Option<String>,
}

/// Login credential pair, nested inside [`UserPayload`] and used standalone
/// by the login route.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct Registration {
    pub name: String,
    pub credentials: Credentials,
    pub profile_pick: Option<String>,
    pub role: UserRole,
}

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl ValidateBody for LoginPayload {
    type Output = Credentials;

    fn check(&self, prefix: &str, violations: &mut Violations) -> Option<Credentials> {
        let email = crate::utils::validate::check_email(violations, prefix, "email", &self.email);
        let password = require_string(violations, prefix, "password", &self.password);

        Some(Credentials {
            email: email?.to_string(),
            password: password?.to_string(),
        })
    }
}

impl ValidateBody for UserPayload {
    type Output = Registration;

    fn check(&self, prefix: &str, violations: &mut Violations) -> Option<Registration> {
        let name = require_string(violations, prefix, "name", &self.name);
        let credentials = check_nested(violations, prefix, "userLogin", &self.user_login);
        let role = check_member(
            violations,
            prefix,
            "role",
            &self.role,
            &["organizer", "visitor"],
        )
        .map(|role| match role.as_str() {
            "organizer" => UserRole::Organizer,
            _ => UserRole::Visitor,
        });

        let profile_pick = self
            .profile_pick
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Some(Registration {
            name: name?.to_string(),
            credentials: credentials?,
            profile_pick,
            role: role?,
        })
    }
}
