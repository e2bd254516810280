//! HTTP client for the college backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;
use validator::Validate;

use crate::domain::entities::{College, ErrorBody, HealthStatus, SetupReport};
use crate::domain::fields::SearchField;
use crate::domain::query::CanonicalQuery;
use crate::domain::repositories::CollegeSource;
use crate::error::AppError;

/// Which search API the backend exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiMode {
    /// A single `GET /search` endpoint taking every field as a query parameter.
    #[default]
    Combined,
    /// One endpoint per field, each answering 404 when nothing matches.
    PerField,
}

impl std::str::FromStr for ApiMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "combined" => Ok(Self::Combined),
            "per-field" | "per_field" => Ok(Self::PerField),
            other => Err(format!(
                "API_MODE must be 'combined' or 'per-field', got '{other}'"
            )),
        }
    }
}

impl std::fmt::Display for ApiMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Combined => write!(f, "combined"),
            Self::PerField => write!(f, "per-field"),
        }
    }
}

/// Per-field endpoints in the priority order the search form used them:
/// `(field, path, query parameter)`.
const PER_FIELD_ROUTES: [(SearchField, &str, &str); 5] = [
    (SearchField::Name, "college", "name"),
    (SearchField::City, "city", "city"),
    (SearchField::Year, "year", "year"),
    (SearchField::State, "state", "state"),
    (SearchField::Facility, "facilities", "facility"),
];

/// Accepts either a single college or a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Box<College>),
    Many(Vec<College>),
}

impl OneOrMany {
    fn into_first(self) -> Option<College> {
        match self {
            Self::One(college) => Some(*college),
            Self::Many(colleges) => colleges.into_iter().next(),
        }
    }
}

/// [`CollegeSource`] backed by the REST backend.
///
/// One request per call, no retries. Non-OK statuses carry the backend's
/// `{"error": ...}` message when the body has one.
#[derive(Debug, Clone)]
pub struct HttpCollegeSource {
    client: Client,
    base_url: Url,
    mode: ApiMode,
}

impl HttpCollegeSource {
    /// Builds a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL cannot be parsed, and
    /// [`AppError::NetworkUnavailable`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration, mode: ApiMode) -> Result<Self, AppError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| AppError::validation(format!("Invalid API URL '{base_url}': {e}")))?;

        // Url::join replaces the last path segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::network(format!("Failed to build HTTP client: {e}")))?;

        info!("College backend at {} ({} API)", base_url, mode);

        Ok(Self {
            client,
            base_url,
            mode,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::validation(format!("Invalid endpoint '{path}': {e}")))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let url = self.endpoint(path)?;
        debug!("GET {} {:?}", url, params);

        let response = self.client.get(url).query(params).send().await?;
        read_json(response).await
    }

    async fn search_combined(&self, query: &CanonicalQuery) -> Result<Vec<College>, AppError> {
        let params: Vec<(&str, &str)> = query.key_values().collect();
        let colleges: Vec<College> = self.get_json("search", &params).await?;
        validate_all(colleges)
    }

    async fn search_per_field(&self, query: &CanonicalQuery) -> Result<Vec<College>, AppError> {
        let Some((path, param, value)) = per_field_route(query) else {
            return Err(AppError::validation(
                "Query has no field served by the per-field endpoints",
            ));
        };

        match self
            .get_json::<Vec<College>>(path, &[(param, value)])
            .await
        {
            Ok(colleges) => validate_all(colleges),
            // The per-field backend reports an empty match as 404.
            Err(AppError::BadResponseStatus { code: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl CollegeSource for HttpCollegeSource {
    async fn search(&self, query: &CanonicalQuery) -> Result<Vec<College>, AppError> {
        match self.mode {
            ApiMode::Combined => self.search_combined(query).await,
            ApiMode::PerField => self.search_per_field(query).await,
        }
    }

    async fn college_by_name(&self, name: &str) -> Result<Option<College>, AppError> {
        match self.get_json::<OneOrMany>("college", &[("name", name)]).await {
            Ok(found) => match found.into_first() {
                Some(college) => {
                    validate_one(&college)?;
                    Ok(Some(college))
                }
                None => Ok(None),
            },
            Err(AppError::BadResponseStatus { code: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn health(&self) -> Result<HealthStatus, AppError> {
        self.get_json("health", &[]).await
    }

    async fn seed_sample_data(&self) -> Result<SetupReport, AppError> {
        let url = self.endpoint("setup")?;
        debug!("POST {}", url);

        let response = self.client.post(url).send().await?;
        read_json(response).await
    }

    fn can_serve(&self, query: &CanonicalQuery) -> bool {
        match self.mode {
            ApiMode::Combined => true,
            ApiMode::PerField => per_field_route(query).is_some(),
        }
    }

    fn needs_local_narrowing(&self) -> bool {
        self.mode == ApiMode::PerField
    }
}

/// Picks the first per-field endpoint whose field is present in the query.
fn per_field_route(query: &CanonicalQuery) -> Option<(&'static str, &'static str, &str)> {
    PER_FIELD_ROUTES.iter().find_map(|(field, path, param)| {
        query.get(*field).map(|value| (*path, *param, value))
    })
}

/// Decodes a JSON body, mapping non-OK statuses to [`AppError::BadResponseStatus`].
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AppError::network(format!("Failed to read response body: {e}")))?;

    if !status.is_success() {
        return Err(status_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| AppError::malformed(e.to_string()))
}

fn status_error(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error);
    AppError::bad_status(status.as_u16(), message)
}

fn validate_one(college: &College) -> Result<(), AppError> {
    college
        .validate()
        .map_err(|e| AppError::malformed(format!("Invalid college '{}': {}", college.name, e)))
}

fn validate_all(colleges: Vec<College>) -> Result<Vec<College>, AppError> {
    colleges.iter().try_for_each(validate_one)?;
    Ok(colleges)
}
