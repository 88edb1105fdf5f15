// Use cases layer: application workflows for the museum server.

pub mod auction;
pub mod audio;
pub mod hall;
pub mod quota;
pub mod types;

pub use types::{CritiqueOutcome, HallEvent, HallUpdate, MuseumEvent};
