use serde::Deserialize;

/// `?page=&size=&sort=` as sent by clients of the events collection. Kept as
/// raw text so numeric errors can name the parameter.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
}

/// Form body of `POST /oauth/token`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub grant_type: String,
    pub username: Option<String>,
    pub password: Option<String>,
}
