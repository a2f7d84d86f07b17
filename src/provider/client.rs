use serde_json::{json, Value};

use crate::{
    errors::{AppError, AppResult},
    keywords::RawRecord,
};

use super::{types::ProviderResponse, KeywordRequest, KeywordSource, ResearchMode};

pub const DEFAULT_BASE_URL: &str = "https://api.dataforseo.com/v3";

const QUESTION_FILTER: &str =
    "^(what|how|why|when|where|who|which|can|is|are|do|does|will|would|could|should).*";
const LONG_TAIL_FILTER: &str = r"^\S+\s+\S+\s+\S+.*";

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credentials {{ username: {:?}, password: [REDUCTED] }}", self.username)
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> AppResult<Self> {
        let username = username.into();
        let password = password.into();
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(AppError::configuration("username and password are required"));
        }
        Ok(Self { username, password })
    }

    /// Reads `DATAFORSEO_USERNAME` and `DATAFORSEO_PASSWORD`.
    pub fn from_env() -> AppResult<Self> {
        let username = std::env::var("DATAFORSEO_USERNAME").unwrap_or_default();
        let password = std::env::var("DATAFORSEO_PASSWORD").unwrap_or_default();
        Self::new(username, password).map_err(|_| {
            AppError::configuration(
                "DataForSEO credentials must be set (DATAFORSEO_USERNAME, DATAFORSEO_PASSWORD)",
            )
        })
    }
}

/// Blocking client for the keyword endpoints of the DataForSEO v3 API.
pub struct DataForSeoClient {
    base_url: String,
    credentials: Credentials,
    http: reqwest::blocking::Client,
}

impl DataForSeoClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        let base_url = base_url.strip_suffix('/').unwrap_or(base_url).to_string();

        DataForSeoClient {
            base_url,
            credentials,
            http: reqwest::blocking::Client::new(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    fn post(&self, endpoint: &str, body: Value) -> AppResult<ProviderResponse> {
        let url = self.url(endpoint);
        log::info!("POST {url}");

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;

        serde_json::from_str::<ProviderResponse>(&text).map_err(|err| {
            log::error!("{err}. status={status} tried to parse: {text:?}");
            AppError::Provider {
                status_code: status.as_u16() as i64,
                message: format!("unreadable provider response: {err}"),
            }
        })
    }

    /// Checks the credentials against the account endpoint.
    pub fn test_connection(&self) -> AppResult<()> {
        let url = self.url("appendix/user_data");
        log::info!("GET {url}");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(AppError::Provider {
            status_code: status.as_u16() as i64,
            message: response.text().unwrap_or_default(),
        })
    }

    pub fn keyword_ideas(&self, request: &KeywordRequest) -> AppResult<Vec<RawRecord>> {
        self.ideas_with_filter(request, None)
    }

    pub fn keyword_questions(&self, request: &KeywordRequest) -> AppResult<Vec<RawRecord>> {
        self.ideas_with_filter(request, Some(QUESTION_FILTER))
    }

    pub fn long_tail_keywords(&self, request: &KeywordRequest) -> AppResult<Vec<RawRecord>> {
        self.ideas_with_filter(request, Some(LONG_TAIL_FILTER))
    }

    fn ideas_with_filter(
        &self,
        request: &KeywordRequest,
        filter: Option<&str>,
    ) -> AppResult<Vec<RawRecord>> {
        let mut task = json!({
            "keywords": [request.seed()],
            "location_name": request.location,
            "language_name": request.language,
            "limit": request.limit,
        });
        if let Some(filter) = filter {
            task["filters"] = json!([["keyword_data.keyword", "regex", filter]]);
        }

        self.post("dataforseo_labs/google/keyword_ideas/live", json!([task]))?
            .into_records()
    }

    pub fn related_keywords(&self, request: &KeywordRequest) -> AppResult<Vec<RawRecord>> {
        let task = json!({
            "keyword": request.seed(),
            "location_name": request.location,
            "language_name": request.language,
            "limit": request.limit,
        });

        self.post("dataforseo_labs/google/related_keywords/live", json!([task]))?
            .into_records()
    }

    pub fn keyword_overview(&self, request: &KeywordRequest) -> AppResult<Vec<RawRecord>> {
        let task = json!({
            "keywords": request.keywords,
            "location_name": request.location,
            "language_name": request.language,
        });

        self.post("dataforseo_labs/google/keyword_overview/live", json!([task]))?
            .into_records()
    }
}

impl KeywordSource for DataForSeoClient {
    fn fetch(&self, mode: ResearchMode, request: &KeywordRequest) -> AppResult<Vec<RawRecord>> {
        match mode {
            ResearchMode::Ideas => self.keyword_ideas(request),
            ResearchMode::Related => self.related_keywords(request),
            ResearchMode::Questions => self.keyword_questions(request),
            ResearchMode::LongTail => self.long_tail_keywords(request),
            ResearchMode::Overview => self.keyword_overview(request),
        }
    }

    fn name(&self) -> &'static str {
        "DataForSEO"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_required() {
        assert!(Credentials::new("", "secret").is_err());
        assert!(Credentials::new("user", "  ").is_err());
        assert!(Credentials::new("user", "secret").is_ok());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new("user", "secret").unwrap();
        let printed = format!("{credentials:?}");
        assert!(printed.contains("user"));
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let credentials = Credentials::new("user", "secret").unwrap();
        let client = DataForSeoClient::new("https://example.com/v3/", credentials);
        assert_eq!(
            client.url("appendix/user_data"),
            "https://example.com/v3/appendix/user_data"
        );
    }
}
