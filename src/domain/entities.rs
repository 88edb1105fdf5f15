// Persistent museum entities shared across the simulation, economy and wire layers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Institutional owner artworks transfer to when sold outside an auction.
pub const MUSEUM_OWNER: &str = "The Museum";

/// Theme-music source for an artwork or the global hall channel.
///
/// The two playback backends are mutually exclusive by construction; a plain
/// pair of optional url fields would have to be kept disjoint by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum MusicSource {
    #[default]
    None,
    YouTube(String),
    LocalFile(String),
}

impl MusicSource {
    pub fn is_configured(&self) -> bool {
        !matches!(self, MusicSource::None)
    }
}

/// A critique attached to an artwork. The artwork list keeps newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critique {
    pub guest_name: String,
    pub text: String,
}

/// A critique remembered by the guest who spoke it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CritiqueMemory {
    pub art_id: String,
    pub art_title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artwork {
    pub id: String,
    pub index_number: u32,
    pub title: String,
    pub artist: String,
    pub description: String,
    pub image_url: String,
    /// Guest ids featured in the piece; they react with a heart when viewing it.
    pub cast: Vec<String>,
    pub owner: String,
    pub price: i64,
    pub est_auction_price: i64,
    /// Newest first.
    pub critiques: Vec<Critique>,
    pub music: MusicSource,
    pub registered_at_ms: u64,
    pub last_cleaned_at_ms: u64,
    pub daily_click_count: u32,
    pub last_click_date: NaiveDate,
    /// Accumulated detail-view time; only ever increases.
    pub total_view_time_ms: u64,
    /// Horizontal anchor of the frame in hall coordinates.
    pub anchor_x: f32,
}

/// Initial render direction of a guest's full-body image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub full_body_image: String,
    /// Free-text traits fed to the critique provider.
    pub personality: String,
    pub speech_style: String,
    pub affinity: u8,
    /// Titles of artworks this guest owns.
    pub owned_artworks: Vec<String>,
    /// Opt-out flag for fresh critique generation.
    pub is_critique_active: bool,
    pub initial_facing: Facing,
    pub critique_history: Vec<CritiqueMemory>,
}

/// The simulated end-user: bids in auctions, receives sale credits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub balance: i64,
}

/// Persisted per-day critique allotment; rebuilt when the stored date differs
/// from the current local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCritiqueRecord {
    pub date: NaiveDate,
    pub target_guest_ids: Vec<String>,
    pub completed_guest_ids: Vec<String>,
}

/// Artwork fields the critique provider needs to compose a prompt.
#[derive(Debug, Clone, Serialize)]
pub struct ArtworkSummary {
    pub title: String,
    pub artist: String,
    pub description: String,
}

impl From<&Artwork> for ArtworkSummary {
    fn from(art: &Artwork) -> Self {
        Self {
            title: art.title.clone(),
            artist: art.artist.clone(),
            description: art.description.clone(),
        }
    }
}

/// Guest persona fields the critique provider needs to compose a prompt.
#[derive(Debug, Clone, Serialize)]
pub struct GuestPersona {
    pub name: String,
    pub personality: String,
    pub speech_style: String,
}

impl From<&Guest> for GuestPersona {
    fn from(guest: &Guest) -> Self {
        Self {
            name: guest.name.clone(),
            personality: guest.personality.clone(),
            speech_style: guest.speech_style.clone(),
        }
    }
}
