use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::entities::{ArtworkSummary, DailyCritiqueRecord, GuestPersona};

// Port for the external text-generation service producing guest critiques.
// Failure is expected and non-fatal; callers fall back to emitting nothing.
#[async_trait]
pub trait CritiqueProvider: Send + Sync {
    async fn generate_critique(
        &self,
        artwork: &ArtworkSummary,
        persona: &GuestPersona,
    ) -> Result<String, String>;
}

// Port for persisting the daily critique allotment across restarts.
#[async_trait]
pub trait QuotaStore: Send + Sync {
    async fn load(&self) -> Result<Option<DailyCritiqueRecord>, String>;
    async fn save(&self, record: &DailyCritiqueRecord) -> Result<(), String>;
}

// Port for retrieving the current time and local calendar day.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
    fn today(&self) -> NaiveDate;
}
