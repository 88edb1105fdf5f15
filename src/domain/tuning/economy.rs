// Gameplay tuning for viewing-time pricing and upkeep.

#[derive(Debug, Clone, Copy)]
pub struct EconomyTuning {
    /// Accumulated viewing time that earns one price bump.
    pub block_ms: u64,
    /// Per-block price increase when the user owns the artwork.
    pub owner_block_bonus: i64,
    /// Per-block price increase for any other owner.
    pub base_block_bonus: i64,
    /// Balance credit for wiping the dust off a frame.
    pub clean_reward: i64,
}

impl Default for EconomyTuning {
    fn default() -> Self {
        Self {
            block_ms: 600_000,
            owner_block_bonus: 3_000_000,
            base_block_bonus: 1_000_000,
            clean_reward: 100,
        }
    }
}
