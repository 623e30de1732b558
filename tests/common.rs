use events_api::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::{
        factory::{run_sqlite_migrations, seed_accounts},
        repositories::{sqlite_account_repo::SqliteAccountRepo, sqlite_event_repo::SqliteEventRepo},
    },
    domain::{
        models::event::{EventSubmission, NewEvent},
        services::event_service::OwnershipPolicy,
    },
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
    Router,
};
use base64::{Engine as _, engine::general_purpose};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::{json, Value};

pub const BASE_URL: &str = "http://localhost";
pub const ADMIN_EMAIL: &str = "admin@events.test";
pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const USER_EMAIL: &str = "user@events.test";
pub const USER_PASSWORD: &str = "user-secret";
pub const CLIENT_ID: &str = "myApp";
pub const CLIENT_SECRET: &str = "pass";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_policy(OwnershipPolicy::ManagerOnly).await
    }

    pub async fn with_policy(policy: OwnershipPolicy) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool).await;

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            public_base_url: BASE_URL.to_string(),
            jwt_secret_key: include_str!("keys/test_private.pem").to_string(),
            jwt_public_key: include_str!("keys/test_public.pem").to_string(),
            auth_issuer: "test-issuer".to_string(),
            access_token_ttl_secs: 600,
            oauth_client_id: CLIENT_ID.to_string(),
            oauth_client_secret: CLIENT_SECRET.to_string(),
            admin_username: ADMIN_EMAIL.to_string(),
            admin_password: ADMIN_PASSWORD.to_string(),
            user_username: USER_EMAIL.to_string(),
            user_password: USER_PASSWORD.to_string(),
            ownership_policy: policy,
        };

        let state = Arc::new(AppState::new(
            config.clone(),
            Arc::new(SqliteEventRepo::new(pool.clone())),
            Arc::new(SqliteAccountRepo::new(pool.clone())),
        ));

        seed_accounts(state.account_repo.as_ref(), &config)
            .await
            .expect("Failed to seed accounts");

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn request_token(&self, client: (&str, &str), form: &str) -> Response {
        let basic = general_purpose::STANDARD.encode(format!("{}:{}", client.0, client.1));
        self.send(
            Request::builder()
                .method("POST")
                .uri("/oauth/token")
                .header(header::AUTHORIZATION, format!("Basic {}", basic))
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap()
        ).await
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let form = format!("grant_type=password&username={}&password={}", username, password);
        let response = self.request_token((CLIENT_ID, CLIENT_SECRET), &form).await;

        if !response.status().is_success() {
            panic!("Token request failed in test helper: status {}", response.status());
        }

        let body = parse_body(response).await;
        body["access_token"].as_str().expect("No access_token in body").to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn user_token(&self) -> String {
        self.login(USER_EMAIL, USER_PASSWORD).await
    }

    pub async fn account_id(&self, email: &str) -> String {
        self.state.account_repo.find_by_email(email).await.unwrap()
            .expect("seeded account missing")
            .id
    }

    pub async fn call(&self, method: &str, uri: &str, token: Option<&str>, body: Option<&Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    /// Stores an event directly, bypassing the HTTP layer.
    pub async fn seed_event(&self, name: &str, manager_id: &str) -> i64 {
        let base: EventSubmission = serde_json::from_value(valid_submission()).unwrap();
        let submission = EventSubmission {
            name: Some(name.to_string()),
            ..base
        };
        let schedule = submission.schedule().unwrap();
        let draft = NewEvent::new(&submission, schedule, manager_id.to_string());
        self.state.event_repo.create(&draft).await.unwrap().id
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

#[allow(dead_code)]
pub fn valid_submission() -> Value {
    json!({
        "name": "Spring",
        "description": "REST API Development with Spring",
        "beginEnrollmentDateTime": "2018-11-23T12:00:00",
        "closeEnrollmentDateTime": "2018-11-23T23:00:00",
        "beginEventDateTime": "2018-11-25T10:00:00",
        "endEventDateTime": "2018-11-25T20:00:00",
        "basePrice": 100,
        "maxPrice": 200,
        "limitOfEnrollment": 100,
        "location": "Gangnam D2 Startup Factory"
    })
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn body_is_empty(response: Response) -> bool {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    bytes.is_empty()
}
