use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::db::mock_db::MockDb;
use crate::models::user::{User, UserRole};
use crate::state::AppState;
use crate::utils::jwt::{TokenKeys, TokenPayload};
use crate::utils::password::hash_password;

pub fn test_config() -> Config {
    Config {
        port: 0,
        db_host: "localhost".into(),
        db_user: "test".into(),
        db_password: "test".into(),
        db_port: 5432,
        db_name: "trece_point_test".into(),
        jwt_secret: "test-access-secret".into(),
        refresh_secret: "test-refresh-secret".into(),
        token_expires_in: 3600,
        refresh_token_expires_in: 7200,
    }
}

/// Wires a single `MockDb` into every repository slot of the state.
pub fn build_state(db: MockDb) -> AppState {
    let config = test_config();
    let token_keys = Arc::new(TokenKeys::from_config(&config));
    let db = Arc::new(db);

    AppState {
        users: db.clone(),
        events: db.clone(),
        places: db.clone(),
        visits: db,
        token_keys,
        config: Arc::new(config),
    }
}

pub fn token_payload(role: UserRole) -> TokenPayload {
    TokenPayload {
        id: Uuid::new_v4(),
        email: "someone@example.com".into(),
        role,
    }
}

pub fn sample_user(role: UserRole, email: &str, password: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: "Sample".into(),
        email: email.into(),
        password_hash: hash_password(password).expect("test hash"),
        profile_pick: None,
        role,
    }
}

/// Access token for an existing user, as the login route would mint it.
pub fn access_token_for(state: &AppState, user: &User) -> String {
    state
        .token_keys
        .issue_access_token(&TokenPayload {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        })
        .expect("test token")
}
