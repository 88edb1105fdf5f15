// Ephemeral per-guest simulation state and the wire snapshots derived from it.

use serde::Serialize;

/// What a guest is currently doing in the hall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Walking,
    Viewing,
}

/// Runtime state owned 1:1 by a roster guest for the lifetime of the current
/// roster. Destroyed and recreated whenever the guest list changes; the
/// `generation` counter lets in-flight work detect that it went stale.
#[derive(Debug, Clone)]
pub struct GuestSim {
    pub guest_id: String,
    pub generation: u64,

    pub x: f32,
    pub target_x: f32,
    pub activity: Activity,
    pub facing_right: bool,
    pub viewing_art_id: Option<String>,

    // Transient display state, cleared by sim-clock deadlines (ms).
    pub message: Option<String>,
    pub message_until_ms: u64,
    pub hearting: bool,
    pub heart_until_ms: u64,

    /// When a viewing guest returns to walking.
    pub dwell_until_ms: u64,
}

impl GuestSim {
    pub fn new(guest_id: String, generation: u64, x: f32, target_x: f32) -> Self {
        Self {
            guest_id,
            generation,
            x,
            target_x,
            activity: Activity::Walking,
            facing_right: true,
            viewing_art_id: None,
            message: None,
            message_until_ms: 0,
            hearting: false,
            heart_until_ms: 0,
            dwell_until_ms: 0,
        }
    }
}

/// Per-tick guest snapshot sent to clients; movement-internal fields stay off
/// the wire.
#[derive(Debug, Clone, Serialize)]
pub struct GuestView {
    pub id: String,
    pub x: f32,
    pub activity: Activity,
    pub facing_right: bool,
    pub viewing_art_id: Option<String>,
    pub message: Option<String>,
    pub hearting: bool,
}

impl From<&GuestSim> for GuestView {
    fn from(sim: &GuestSim) -> Self {
        Self {
            id: sim.guest_id.clone(),
            x: sim.x,
            activity: sim.activity,
            facing_right: sim.facing_right,
            viewing_art_id: sim.viewing_art_id.clone(),
            message: sim.message.clone(),
            hearting: sim.hearting,
        }
    }
}
