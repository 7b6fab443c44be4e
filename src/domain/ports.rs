use crate::domain::model::Grid;
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// 以 session 為範圍的鍵值儲存
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// 81 個以 (row, col) 定址的輸入格
pub trait GridForm: Send + Sync {
    fn read_cell(&self, row: usize, col: usize) -> String;
    fn write_cell(&mut self, row: usize, col: usize, value: &str);
}

pub trait Navigator: Send + Sync {
    /// 取代目前頁面（不留下歷史紀錄）
    fn replace(&self, url: &str);
    fn assign(&self, url: &str);
}

#[async_trait]
pub trait SolverService: Send + Sync {
    async fn solve(
        &self,
        service_url: &str,
        grid: &Grid,
        cancel: &CancellationToken,
    ) -> Result<Grid>;
}
