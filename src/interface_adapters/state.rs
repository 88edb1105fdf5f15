use tokio::sync::{broadcast, mpsc};

use crate::use_cases::{HallEvent, HallUpdate, MuseumEvent};

#[derive(Clone)]
pub struct AppState {
    // Inputs flowing from the network into the hall loop.
    pub input_tx: mpsc::Sender<HallEvent>,
    // Per-tick hall snapshots produced by the loop.
    pub hall_tx: broadcast::Sender<HallUpdate>,
    // Discrete notifications produced by the loop.
    pub event_tx: broadcast::Sender<MuseumEvent>,
}
