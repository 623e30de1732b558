use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountRole {
    Admin,
    User,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Admin => "ADMIN",
            AccountRole::User => "USER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "ADMIN" => Some(AccountRole::Admin),
            "USER" => Some(AccountRole::User),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Account {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Comma separated role names, e.g. `ADMIN,USER`.
    pub roles: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: String, password_hash: String, roles: &[AccountRole]) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            roles: join_roles(roles),
            created_at: Utc::now(),
        }
    }

    pub fn roles(&self) -> Vec<AccountRole> {
        self.roles.split(',').filter_map(AccountRole::parse).collect()
    }

    pub fn identity(&self) -> CallerIdentity {
        CallerIdentity {
            account_id: self.id.clone(),
            email: self.email.clone(),
            roles: self.roles(),
        }
    }
}

pub fn join_roles(roles: &[AccountRole]) -> String {
    roles.iter().map(AccountRole::as_str).collect::<Vec<_>>().join(",")
}

/// The authenticated caller of a request, resolved from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallerIdentity {
    pub account_id: String,
    pub email: String,
    pub roles: Vec<AccountRole>,
}

impl CallerIdentity {
    pub fn has_role(&self, role: AccountRole) -> bool {
        self.roles.contains(&role)
    }
}
