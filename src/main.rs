use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use trece_point_backend::config::Config;
use trece_point_backend::db::postgres_event_repository::PostgresEventRepository;
use trece_point_backend::db::postgres_place_repository::PostgresPlaceRepository;
use trece_point_backend::db::postgres_user_repository::PostgresUserRepository;
use trece_point_backend::db::postgres_visit_repository::PostgresVisitRepository;
use trece_point_backend::db::user_repository::UserRepository;
use trece_point_backend::models::user::{NewUser, UserRole};
use trece_point_backend::responses::JsonResponse;
use trece_point_backend::routes::auth::auth_router;
use trece_point_backend::routes::events::event_router;
use trece_point_backend::routes::places::place_router;
use trece_point_backend::routes::users::user_router;
use trece_point_backend::routes::visits::visit_router;
use trece_point_backend::state::AppState;
use trece_point_backend::utils::jwt::TokenKeys;
use trece_point_backend::utils::password::hash_password;

const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let config = Config::from_env();

    let pool = establish_connection(&config.database_url()).await;

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let users = Arc::new(PostgresUserRepository { pool: pool.clone() });

    ensure_default_admin(users.as_ref()).await;

    let state = AppState {
        users,
        events: Arc::new(PostgresEventRepository { pool: pool.clone() }),
        places: Arc::new(PostgresPlaceRepository { pool: pool.clone() }),
        visits: Arc::new(PostgresVisitRepository { pool: pool.clone() }),
        token_keys: Arc::new(TokenKeys::from_config(&config)),
        config: Arc::new(config.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(root))
        .nest("/auth", auth_router())
        .nest("/user", user_router(state.clone()))
        .nest("/event", event_router(state.clone()))
        .nest("/place", place_router(state.clone()))
        .nest("/visited", visit_router(state.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await.unwrap();
    info!("Server is running on http://{}", addr);
    axum::serve(listener, app.into_make_service()).await.unwrap();
}

/// Liveness probe.
async fn root() -> Response {
    JsonResponse::ok("Welcome to the Trece Point API").into_response()
}

async fn establish_connection(database_url: &str) -> PgPool {
    let pool = PgPool::connect(database_url)
        .await
        .expect("Failed to connect to the database");

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .expect("Failed to verify database connection");

    info!("Database initialized");
    pool
}

/// Registration never mints admins, so the one admin account is seeded here
/// on first boot. The default password is a placeholder and must be changed.
async fn ensure_default_admin(users: &dyn UserRepository) {
    match users.find_user_by_email(DEFAULT_ADMIN_EMAIL).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            let password_hash = hash_password(DEFAULT_ADMIN_PASSWORD)
                .expect("Failed to hash the default admin password");

            match users
                .create_user(&NewUser {
                    name: "Admin User".into(),
                    email: DEFAULT_ADMIN_EMAIL.into(),
                    password_hash,
                    profile_pick: None,
                    role: UserRole::Admin,
                })
                .await
            {
                Ok(_) => warn!(
                    "Seeded default admin user {DEFAULT_ADMIN_EMAIL}; change its password"
                ),
                Err(e) => warn!("Failed to seed default admin user: {e}"),
            }
        }
        Err(e) => warn!("Could not check for the default admin user: {e}"),
    }
}
