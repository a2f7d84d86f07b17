use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    keywords::RawRecord,
};

/// Status code the provider uses for a successful call or task.
pub const SUCCESS_STATUS: i64 = 20000;

/// Envelope of every DataForSEO v3 response.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProviderResponse {
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub tasks: Option<Vec<ProviderTask>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProviderTask {
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub result: Option<Vec<TaskResult>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TaskResult {
    #[serde(default)]
    pub items: Option<Vec<RawRecord>>,
}

fn check_status(status_code: Option<i64>, status_message: &Option<String>) -> AppResult<()> {
    match status_code {
        Some(code) if code != SUCCESS_STATUS => Err(AppError::Provider {
            status_code: code,
            message: status_message.clone().unwrap_or_default(),
        }),
        _ => Ok(()),
    }
}

impl ProviderResponse {
    /// Items of the first result of the first task.
    ///
    /// A response without that path carries no keywords and yields an
    /// empty list. Error status codes, on the call or on the task, are
    /// reported as [`AppError::Provider`].
    pub fn into_records(self) -> AppResult<Vec<RawRecord>> {
        check_status(self.status_code, &self.status_message)?;

        let Some(task) = self.tasks.and_then(|tasks| tasks.into_iter().next()) else {
            return Ok(vec![]);
        };
        check_status(task.status_code, &task.status_message)?;

        Ok(task
            .result
            .and_then(|results| results.into_iter().next())
            .and_then(|result| result.items)
            .unwrap_or_default())
    }
}

/// Either a bare array of provider items or a full provider response.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordsInput {
    Records(Vec<RawRecord>),
    Response(ProviderResponse),
}

impl RecordsInput {
    pub fn into_records(self) -> AppResult<Vec<RawRecord>> {
        match self {
            RecordsInput::Records(records) => Ok(records),
            RecordsInput::Response(response) => response.into_records(),
        }
    }
}

pub fn parse_records(json: &str) -> AppResult<Vec<RawRecord>> {
    serde_json::from_str::<RecordsInput>(json)?.into_records()
}
