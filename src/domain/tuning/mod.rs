// Gameplay tuning grouped by subsystem.

pub mod auction;
pub mod audio;
pub mod economy;
pub mod guest;

pub use auction::AuctionTuning;
pub use audio::AudioTuning;
pub use economy::EconomyTuning;
pub use guest::GuestTuning;
