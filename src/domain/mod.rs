// Domain layer: museum entities, runtime state, ports and tuning.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod state;
pub mod tuning;

pub use entities::{
    Artwork, ArtworkSummary, Critique, CritiqueMemory, DailyCritiqueRecord, Facing, Guest,
    GuestPersona, MusicSource, UserAccount, MUSEUM_OWNER,
};
pub use errors::BidError;
pub use ports::{Clock, CritiqueProvider, QuotaStore};
pub use state::{Activity, GuestSim, GuestView};
