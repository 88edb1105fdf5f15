// Viewing-time pricing and ownership transitions for artworks.

use chrono::NaiveDate;
use tracing::info;

use crate::domain::entities::{Artwork, UserAccount, MUSEUM_OWNER};
use crate::domain::tuning::EconomyTuning;

/// Outcome of closing one viewing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewingReceipt {
    pub price: i64,
    pub total_view_time_ms: u64,
    pub blocks_crossed: u64,
}

/// Accumulates one closed viewing session into the artwork.
///
/// Price rises only when the running total crosses a block boundary during
/// this increment; partial progress is banked in `total_view_time_ms` but not
/// rewarded early. Callers must record each session exactly once — replaying
/// the same duration double-counts.
pub fn record_viewing(
    art: &mut Artwork,
    duration_ms: u64,
    user_name: &str,
    cfg: EconomyTuning,
) -> ViewingReceipt {
    let old_total = art.total_view_time_ms;
    let new_total = old_total.saturating_add(duration_ms);

    let blocks_crossed = new_total / cfg.block_ms - old_total / cfg.block_ms;
    if blocks_crossed > 0 {
        let rate = if art.owner == user_name {
            cfg.owner_block_bonus
        } else {
            cfg.base_block_bonus
        };
        art.price += blocks_crossed as i64 * rate;
        info!(
            art_id = %art.id,
            blocks_crossed,
            price = art.price,
            "viewing time crossed price block"
        );
    }
    art.total_view_time_ms = new_total;

    ViewingReceipt {
        price: art.price,
        total_view_time_ms: art.total_view_time_ms,
        blocks_crossed,
    }
}

/// Transfers the artwork to the museum and credits the seller in one step.
/// Runs inside the single-writer hall loop, so both effects land together.
pub fn sell_to_museum(art: &mut Artwork, user: &mut UserAccount) {
    let sale_price = art.price;
    art.owner = MUSEUM_OWNER.to_string();
    user.balance += sale_price;
    info!(art_id = %art.id, sale_price, "artwork sold to the museum");
}

/// Bumps the daily click counter, resetting it when the day has rolled over.
pub fn register_click(art: &mut Artwork, today: NaiveDate) {
    if art.last_click_date == today {
        art.daily_click_count += 1;
    } else {
        art.daily_click_count = 1;
        art.last_click_date = today;
    }
}

/// Wipes the dust off a frame for a small reward.
pub fn clean(art: &mut Artwork, user: &mut UserAccount, now_ms: u64, cfg: EconomyTuning) {
    art.last_cleaned_at_ms = now_ms;
    user.balance += cfg.clean_reward;
}
