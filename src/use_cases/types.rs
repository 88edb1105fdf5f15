// Use-case level inputs/outputs for the hall loop.

use crate::domain::entities::{Artwork, Guest, MusicSource};
use crate::domain::state::GuestView;
use crate::use_cases::audio::AudioCommand;

/// Commands driving the hall loop, delivered over the input channel.
#[derive(Debug, Clone)]
pub enum HallEvent {
    /// Replaces the guest roster; all wander state restarts.
    RosterUpdated { guests: Vec<Guest> },
    /// Replaces the artwork collection; anchors are recomputed.
    CollectionUpdated { artworks: Vec<Artwork> },
    /// The user opened an artwork's detail view. Opening a new one while
    /// another is open also closes the previous viewing session.
    ArtworkOpened { art_id: String },
    /// The user closed the detail view.
    ArtworkClosed,
    ArtworkCleaned { art_id: String },
    /// Instant sale of a user-owned artwork to the museum.
    ArtworkSold { art_id: String },
    AuctionStarted { art_id: String },
    AuctionBid { amount: i64 },
    AuctionPassed,
    AuctionCancelled,
    VolumeChanged { volume: f32 },
    GlobalMusicChanged { source: MusicSource },
}

/// Per-tick hall snapshot broadcast to every connected client.
#[derive(Debug, Clone)]
pub struct HallUpdate {
    pub tick: u64,
    pub guests: Vec<GuestView>,
}

/// Discrete notifications broadcast alongside the tick stream.
#[derive(Debug, Clone)]
pub enum MuseumEvent {
    /// A guest spoke in front of an artwork. `fresh` distinguishes a newly
    /// generated critique from a replayed or recalled one.
    CritiqueSpoken {
        guest_id: String,
        guest_name: String,
        art_id: String,
        text: String,
        fresh: bool,
    },
    /// Price, ownership or upkeep fields changed.
    ArtworkUpdated { artwork: Artwork },
    BalanceUpdated { balance: i64 },
    AuctionTurn {
        bidder_name: String,
        is_user_turn: bool,
    },
    AuctionBidPlaced { bidder_name: String, amount: i64 },
    AuctionPassed { bidder_name: String },
    AuctionEnded {
        art_id: String,
        winner_name: String,
        final_price: i64,
    },
    BidRejected { reason: String },
    Audio(AudioCommand),
}

/// Result of an off-loop critique generation, tagged so the loop can discard
/// it when the roster changed while the provider was thinking.
#[derive(Debug, Clone)]
pub struct CritiqueOutcome {
    pub guest_id: String,
    pub generation: u64,
    pub art_id: String,
    pub art_title: String,
    pub guest_name: String,
    /// None when the provider failed; the guest simply stays quiet.
    pub text: Option<String>,
}
