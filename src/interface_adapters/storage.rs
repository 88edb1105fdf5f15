// Filesystem persistence for the daily critique allotment, plus the real
// clock implementation.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::entities::DailyCritiqueRecord;
use crate::domain::ports::{Clock, QuotaStore};

/// One small JSON file holding today's critique record.
#[derive(Clone)]
pub struct JsonFileQuotaStore {
    path: PathBuf,
}

impl JsonFileQuotaStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuotaStore for JsonFileQuotaStore {
    async fn load(&self) -> Result<Option<DailyCritiqueRecord>, String> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            // First run: no file yet.
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(format!("read {}: {err}", self.path.display())),
        };
        let record = serde_json::from_slice(&bytes)
            .map_err(|err| format!("parse {}: {err}", self.path.display()))?;
        Ok(Some(record))
    }

    async fn save(&self, record: &DailyCritiqueRecord) -> Result<(), String> {
        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|err| format!("serialize critique record: {err}"))?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| format!("create {}: {err}", parent.display()))?;
        }
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|err| format!("write {}: {err}", self.path.display()))
    }
}

/// Wall-clock time and the machine's local calendar day.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
