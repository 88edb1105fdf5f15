// Thin wrapper around reqwest for the external text-generation service that
// writes guest critiques.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::{ArtworkSummary, GuestPersona};
use crate::domain::ports::CritiqueProvider;

#[derive(Clone)]
pub struct CritiqueClient {
    http: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug)]
pub enum CritiqueClientError {
    Transport(reqwest::Error),
    Upstream { status: StatusCode },
    Decode(reqwest::Error),
    EmptyResponse,
}

impl fmt::Display for CritiqueClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CritiqueClientError::Transport(err) => write!(f, "critique transport error: {err}"),
            CritiqueClientError::Upstream { status } => {
                write!(f, "critique upstream error {status}")
            }
            CritiqueClientError::Decode(err) => write!(f, "critique response decode error: {err}"),
            CritiqueClientError::EmptyResponse => write!(f, "critique service returned no text"),
        }
    }
}

impl std::error::Error for CritiqueClientError {}

impl CritiqueClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        // A stuck generation must not hold a guest's allotment hostage.
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    fn compose_prompt(artwork: &ArtworkSummary, persona: &GuestPersona) -> String {
        format!(
            "You are {name}, a museum guest. Personality: {personality}. \
             Speech style: {speech}. You are standing in front of \"{title}\" \
             by {artist}. {description}\n\
             Give a short critique of the artwork, in character, in one or \
             two sentences. Reply with the critique only.",
            name = persona.name,
            personality = persona.personality,
            speech = persona.speech_style,
            title = artwork.title,
            artist = artwork.artist,
            description = artwork.description,
        )
    }

    async fn generate(
        &self,
        artwork: &ArtworkSummary,
        persona: &GuestPersona,
    ) -> Result<String, CritiqueClientError> {
        let url = format!("{}/api/generate", self.base_url);
        let req = GenerateRequest {
            model: &self.model,
            prompt: Self::compose_prompt(artwork, persona),
            stream: false,
        };

        let res = self
            .http
            .post(url)
            .json(&req)
            .send()
            .await
            .map_err(CritiqueClientError::Transport)?;
        let status = res.status();
        if !status.is_success() {
            return Err(CritiqueClientError::Upstream { status });
        }

        let payload = res
            .json::<GenerateResponse>()
            .await
            .map_err(CritiqueClientError::Decode)?;
        let text = payload.response.trim().to_string();
        if text.is_empty() {
            return Err(CritiqueClientError::EmptyResponse);
        }
        debug!(guest = %persona.name, chars = text.len(), "critique generated");
        Ok(text)
    }
}

#[async_trait]
impl CritiqueProvider for CritiqueClient {
    async fn generate_critique(
        &self,
        artwork: &ArtworkSummary,
        persona: &GuestPersona,
    ) -> Result<String, String> {
        self.generate(artwork, persona)
            .await
            .map_err(|err| err.to_string())
    }
}
