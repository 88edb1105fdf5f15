// Gameplay tuning for the turn-based auction.

#[derive(Debug, Clone, Copy)]
pub struct AuctionTuning {
    /// Opening bid is at least this amount regardless of the listed price.
    pub floor_price: i64,
    /// AI raises are uniform in [min_raise, max_raise).
    pub min_raise: i64,
    pub max_raise: i64,
    /// Chance an AI participant bids instead of passing on its turn.
    pub bid_probability: f64,
    /// Chance the gavel falls on any successful bid above the listed price.
    /// There is no other end condition; termination is almost-sure, not bounded.
    pub sudden_death_probability: f64,
    /// Simulated "thinking" delay before an AI turn resolves.
    pub think_delay_ms: u64,
    /// Delay between the gavel falling and the settlement callback.
    pub settle_delay_ms: u64,
}

impl Default for AuctionTuning {
    fn default() -> Self {
        Self {
            floor_price: 20_000_000,
            min_raise: 500_000,
            max_raise: 10_000_000,
            bid_probability: 0.7,
            sudden_death_probability: 0.2,
            think_delay_ms: 1_500,
            settle_delay_ms: 4_000,
        }
    }
}
