// Gameplay tuning for guest wandering, dwell and critique behavior.

#[derive(Debug, Clone, Copy)]
pub struct GuestTuning {
    /// Walk speed in hall px per second.
    pub walk_speed: f32,
    /// Distance to the target below which the guest counts as arrived.
    pub arrive_threshold: f32,
    /// Half-width of the window around an artwork anchor that counts as
    /// standing in front of it.
    pub art_proximity: f32,
    /// Wander targets stay this far clear of the hall edges.
    pub hall_margin: f32,

    pub dwell_min_ms: u64,
    pub dwell_max_ms: u64,
    pub heart_duration_ms: u64,
    /// How long a freshly spoken critique stays on screen.
    pub message_duration_ms: u64,
    /// How long a recollection message stays on screen.
    pub recall_message_duration_ms: u64,
    /// Period of the recollection scan over walking guests.
    pub recall_interval_ms: u64,

    /// Chance to replay a prior critique for this artwork instead of asking
    /// the provider for a fresh one. Governs call volume to the provider.
    pub replay_probability: f64,
}

impl Default for GuestTuning {
    fn default() -> Self {
        Self {
            walk_speed: 120.0,
            arrive_threshold: 10.0,
            art_proximity: 200.0,
            hall_margin: 100.0,
            dwell_min_ms: 5_000,
            dwell_max_ms: 10_000,
            heart_duration_ms: 3_000,
            message_duration_ms: 6_000,
            recall_message_duration_ms: 5_000,
            recall_interval_ms: 300_000,
            replay_probability: 0.5,
        }
    }
}
