use crate::domain::ports::Navigator;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Replace(String),
    Assign(String),
}

impl Navigation {
    pub fn target(&self) -> &str {
        match self {
            Navigation::Replace(url) | Navigation::Assign(url) => url,
        }
    }
}

/// 記錄每次導頁，供 CLI 輸出與測試檢查
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    history: Arc<Mutex<Vec<Navigation>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Navigation> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<Navigation> {
        self.history().pop()
    }

    fn record(&self, navigation: Navigation) {
        tracing::info!("Navigating to {}", navigation.target());
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(navigation);
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, url: &str) {
        self.record(Navigation::Replace(url.to_string()));
    }

    fn assign(&self, url: &str) {
        self.record(Navigation::Assign(url.to_string()));
    }
}
