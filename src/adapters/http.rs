use crate::domain::model::Grid;
use crate::domain::ports::SolverService;
use crate::utils::error::{Result, SudokuError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// 附加在 ServiceURL 後面的路徑
pub const SOLVE_PATH: &str = "sudoku";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct SolveRequest<'a> {
    sudoku: &'a Grid,
}

/// 透過 HTTP POST 呼叫遠端解題服務
#[derive(Debug, Clone)]
pub struct HttpSolver {
    client: Client,
    timeout: Duration,
}

impl Default for HttpSolver {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl HttpSolver {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn request_url(service_url: &str) -> String {
        format!("{}{}", service_url, SOLVE_PATH)
    }

    async fn exchange(&self, url: &str, grid: &Grid) -> Result<Grid> {
        let response = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .body(serde_json::to_vec(&SolveRequest { sudoku: grid })?)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SudokuError::ServiceStatus {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let text = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| SudokuError::malformed(format!("response is not JSON: {}", e)))?;
        tracing::info!("API Response. {}", body);

        let sudoku = body
            .get("sudoku")
            .ok_or_else(|| SudokuError::malformed("response has no `sudoku` field"))?;
        Grid::from_value(sudoku)
    }
}

#[async_trait]
impl SolverService for HttpSolver {
    async fn solve(
        &self,
        service_url: &str,
        grid: &Grid,
        cancel: &CancellationToken,
    ) -> Result<Grid> {
        let url = Self::request_url(service_url);
        tracing::info!("API Request. {} {}", url, serde_json::json!({ "sudoku": grid }));

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::warn!("Solve request to {} cancelled", url);
                Err(SudokuError::Cancelled)
            }
            result = tokio::time::timeout(self.timeout, self.exchange(&url, grid)) => match result {
                Ok(outcome) => outcome,
                Err(_) => {
                    tracing::warn!("Solve request to {} timed out after {:?}", url, self.timeout);
                    Err(SudokuError::Timeout {
                        seconds: self.timeout.as_secs(),
                    })
                }
            },
        }
    }
}
