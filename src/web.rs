use crate::{
    config::Config,
    errors::AppError,
    keywords::{self, SortBy, Threshold},
    provider::{Credentials, DataForSeoClient, KeywordRequest, KeywordSource, RecordsInput, ResearchMode},
    relevance,
    research::{ResearchOutcome, ResearchQuery, Researcher},
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::{fmt::Debug, sync::Arc};
use tokio::signal;

/// Builds a keyword source per request, so blocking HTTP clients are
/// created and dropped off the async executor.
pub type SourceFactory =
    Arc<dyn Fn() -> Result<Arc<dyn KeywordSource>, AppError> + Send + Sync>;

#[derive(Clone)]
pub struct SharedState {
    pub config: Config,
    pub make_source: SourceFactory,
}

impl SharedState {
    /// DataForSEO-backed state. Missing credentials only fail the
    /// requests that need the provider.
    pub fn from_config(config: Config, credentials: Option<Credentials>) -> Self {
        let base_url = config.provider.base_url.clone();
        let make_source: SourceFactory = Arc::new(move || {
            let credentials = credentials.clone().ok_or_else(|| {
                AppError::configuration(
                    "DataForSEO credentials must be set (DATAFORSEO_USERNAME, DATAFORSEO_PASSWORD)",
                )
            })?;
            Ok(Arc::new(DataForSeoClient::new(&base_url, credentials)) as Arc<dyn KeywordSource>)
        });

        Self {
            config,
            make_source,
        }
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/status", get(status))
        .route("/api/health", get(health))
        .route("/api/test-connection", post(test_connection))
        .route("/api/relevance/score", post(score))
        .route("/api/relevance/filter", post(filter))
        .route("/api/keyword-research", get(default_research))
        .route("/api/keyword-research/:mode", post(keyword_research))
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO),
                )
                .on_response(
                    tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO),
                ),
        )
        .with_state(Arc::new(state))
}

async fn start_app(state: SharedState) -> anyhow::Result<()> {
    async fn shutdown_signal() {
        let ctrl_c = async {
            if let Err(err) = signal::ctrl_c().await {
                log::error!("failed to install Ctrl+C handler: {err}");
            }
        };

        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(err) => {
                    log::error!("failed to install signal handler: {err}");
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
        log::warn!("shutting down");
    }

    let listen = state.config.web.listen.clone();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    log::info!("listening on {listen}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn start_daemon(state: SharedState) -> anyhow::Result<()> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { start_app(state).await })
}

#[derive(Debug)]
struct HttpError(AppError);

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0 {
            AppError::InvalidThreshold(_) | AppError::InvalidInput(_) | AppError::Json(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Provider { .. } | AppError::Reqwest(_) => {
                log::error!("{self:?}");
                StatusCode::BAD_GATEWAY
            }
            AppError::Configuration(_)
            | AppError::IO(_)
            | AppError::Yaml(_)
            | AppError::Other(_) => {
                log::error!("{self:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}

impl<E> From<E> for HttpError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

/// `Json` whose rejection is answered with a JSON error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(HttpError))]
struct ApiJson<T>(T);

/// `Path` whose rejection is answered with a JSON error body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(HttpError))]
struct ApiPath<T>(T);

async fn status() -> Json<Value> {
    Json(json!({
        "status": "online",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "kwscope",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "kwscope is running",
    }))
}

#[derive(Deserialize)]
pub struct TestConnectionRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Debug for TestConnectionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TestConnectionRequest {{ username: {:?}, password: [REDUCTED] }}", self.username)
    }
}

async fn test_connection(
    State(state): State<Arc<SharedState>>,
    ApiJson(payload): ApiJson<TestConnectionRequest>,
) -> (StatusCode, Json<Value>) {
    log::debug!("payload: {payload:?}");

    let credentials = match Credentials::new(
        payload.username.unwrap_or_default(),
        payload.password.unwrap_or_default(),
    ) {
        Ok(credentials) => credentials,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "message": "Username and password are required"})),
            )
        }
    };

    let base_url = state.config.provider.base_url.clone();
    let result = tokio::task::block_in_place(move || {
        DataForSeoClient::new(&base_url, credentials).test_connection()
    });

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"success": true, "message": "Connection successful"})),
        ),
        Err(AppError::Provider { message, .. }) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": message})),
        ),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "message": err.to_string()})),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub seed: String,
    pub candidate: String,
    #[serde(default)]
    pub threshold: Option<Threshold>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub breakdown: relevance::ScoreBreakdown,
    pub verdict: relevance::Verdict,
}

async fn score(
    State(state): State<Arc<SharedState>>,
    ApiJson(payload): ApiJson<ScoreRequest>,
) -> Json<ScoreResponse> {
    let threshold = payload
        .threshold
        .unwrap_or(state.config.relevance.default_threshold);

    Json(ScoreResponse {
        breakdown: relevance::explain(&payload.candidate, &payload.seed),
        verdict: relevance::evaluate(&payload.candidate, &payload.seed, threshold.value()),
    })
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub seed: String,
    #[serde(default)]
    pub threshold: Option<Threshold>,
    #[serde(default)]
    pub sort: Option<SortBy>,
    pub records: RecordsInput,
}

async fn filter(
    State(state): State<Arc<SharedState>>,
    ApiJson(payload): ApiJson<FilterRequest>,
) -> Result<Json<ResearchOutcome>, HttpError> {
    let relevance_config = &state.config.relevance;
    let threshold = payload.threshold.unwrap_or(relevance_config.default_threshold);
    let sort = payload.sort.unwrap_or(relevance_config.default_sort);

    let records = payload.records.into_records()?;
    let accepted = keywords::filter_and_score(&records, &payload.seed, threshold);

    Ok(Json(ResearchOutcome::new(accepted, sort)))
}

#[derive(Debug, Default, Deserialize)]
pub struct KeywordResearchRequest {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub threshold: Option<Threshold>,
    #[serde(default)]
    pub sort: Option<SortBy>,
}

async fn keyword_research(
    State(state): State<Arc<SharedState>>,
    ApiPath(mode): ApiPath<ResearchMode>,
    ApiJson(payload): ApiJson<KeywordResearchRequest>,
) -> Result<Json<ResearchOutcome>, HttpError> {
    log::debug!("mode: {mode} payload: {payload:?}");

    let keywords: Vec<String> = match (payload.keyword, payload.keywords) {
        (Some(keyword), _) if mode != ResearchMode::Overview => vec![keyword],
        (_, Some(keywords)) => keywords,
        (Some(keyword), None) => vec![keyword],
        (None, None) => vec![],
    };
    if keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(AppError::invalid_input("keyword is required").into());
    }

    let provider = &state.config.provider;
    let relevance_config = &state.config.relevance;
    let query = ResearchQuery {
        request: KeywordRequest {
            keywords,
            location: payload.location.unwrap_or_else(|| provider.location.clone()),
            language: payload.language.unwrap_or_else(|| provider.language.clone()),
            limit: payload.limit.unwrap_or(provider.default_limit),
        },
        modes: vec![mode],
        threshold: payload.threshold.unwrap_or(relevance_config.default_threshold),
        sort: payload.sort.unwrap_or(relevance_config.default_sort),
    };

    let make_source = state.make_source.clone();
    tokio::task::block_in_place(move || {
        let researcher = Researcher::new(make_source()?);
        Ok(Json(researcher.research(&query)))
    })
}

/// Landing view of the dashboard.
async fn default_research(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<ResearchOutcome>, HttpError> {
    let provider = state.config.provider.clone();
    let relevance_config = state.config.relevance.clone();

    let make_source = state.make_source.clone();
    tokio::task::block_in_place(move || {
        let researcher = Researcher::new(make_source()?);
        Ok(Json(researcher.research_default(
            &provider.location,
            &provider.language,
            relevance_config.default_threshold,
            relevance_config.default_sort,
        )))
    })
}
