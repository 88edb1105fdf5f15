// Turn-based auction state machine, driven by the hall loop's deadlines.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::domain::entities::{Artwork, Guest, UserAccount};
use crate::domain::errors::BidError;
use crate::domain::tuning::AuctionTuning;

#[derive(Debug, Clone)]
pub struct Bidder {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub is_user: bool,
}

/// What a participant did on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Bid { amount: i64, gavel: bool },
    Pass,
}

/// An accepted user bid; `gavel` is true when it ended the auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedBid {
    pub amount: i64,
    pub gavel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub winner_name: String,
    pub final_price: i64,
}

/// One live auction for a single artwork.
///
/// Participants act in a fixed shuffled order. A bid can end the auction
/// immediately (the gavel) but only once the standing bid exceeds the listed
/// price, so the seller never settles below it. Passing never ends the
/// auction; with a nonzero gavel chance it still terminates almost surely.
#[derive(Debug, Clone)]
pub struct AuctionSession {
    art_id: String,
    listed_price: i64,
    participants: Vec<Bidder>,
    turn: usize,
    current_bid: i64,
    last_bidder_name: String,
    ended: bool,
    cfg: AuctionTuning,
}

impl AuctionSession {
    /// Opens an auction with the full guest roster plus the user, in a fresh
    /// shuffled order. The opening bid stands with the current owner at the
    /// listed price, raised to the floor if the listing is below it.
    pub fn open(
        art: &Artwork,
        guests: &[Guest],
        user: &UserAccount,
        cfg: AuctionTuning,
        rng: &mut StdRng,
    ) -> Self {
        let mut participants: Vec<Bidder> = guests
            .iter()
            .map(|g| Bidder {
                id: g.id.clone(),
                name: g.name.clone(),
                avatar: g.avatar.clone(),
                is_user: false,
            })
            .collect();
        participants.push(Bidder {
            id: format!("user:{}", user.username),
            name: user.username.clone(),
            avatar: String::new(),
            is_user: true,
        });
        participants.shuffle(rng);

        let current_bid = art.price.max(cfg.floor_price);
        info!(
            art_id = %art.id,
            opening_bid = current_bid,
            participants = participants.len(),
            "auction opened"
        );

        Self {
            art_id: art.id.clone(),
            listed_price: art.price,
            participants,
            turn: 0,
            current_bid,
            last_bidder_name: art.owner.clone(),
            ended: false,
            cfg,
        }
    }

    pub fn art_id(&self) -> &str {
        &self.art_id
    }

    pub fn current_bid(&self) -> i64 {
        self.current_bid
    }

    pub fn current_bidder(&self) -> &Bidder {
        &self.participants[self.turn]
    }

    pub fn is_user_turn(&self) -> bool {
        self.current_bidder().is_user
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Name currently holding the standing bid.
    pub fn leading_bidder(&self) -> &str {
        &self.last_bidder_name
    }

    /// The winner and hammer price, available once the gavel has fallen.
    pub fn settlement(&self) -> Option<Settlement> {
        self.ended.then(|| Settlement {
            winner_name: self.last_bidder_name.clone(),
            final_price: self.current_bid,
        })
    }

    /// Resolves the current AI participant's turn. Panics in debug builds if
    /// called on the user's turn; the loop gates on `is_user_turn` first.
    pub fn ai_turn(&mut self, rng: &mut StdRng) -> TurnAction {
        debug_assert!(!self.is_user_turn());
        if self.ended {
            return TurnAction::Pass;
        }

        if !rng.gen_bool(self.cfg.bid_probability) {
            self.advance_turn();
            return TurnAction::Pass;
        }

        let raise = rng.gen_range(self.cfg.min_raise..self.cfg.max_raise);
        let amount = self.current_bid + raise;
        let name = self.current_bidder().name.clone();
        let gavel = self.apply_bid(name, amount, rng);
        TurnAction::Bid { amount, gavel }
    }

    /// Validates and applies a bid from the user. The user never passes
    /// through this path, so an accepted bid is always a raise.
    pub fn user_bid(
        &mut self,
        amount: i64,
        balance: i64,
        rng: &mut StdRng,
    ) -> Result<PlacedBid, BidError> {
        if self.ended {
            return Err(BidError::AuctionEnded);
        }
        if !self.is_user_turn() {
            return Err(BidError::NotYourTurn);
        }
        if amount <= self.current_bid {
            return Err(BidError::BidTooLow {
                current_bid: self.current_bid,
            });
        }
        if amount > balance {
            return Err(BidError::InsufficientFunds);
        }

        let name = self.current_bidder().name.clone();
        let gavel = self.apply_bid(name, amount, rng);
        Ok(PlacedBid { amount, gavel })
    }

    /// The user declines to bid; the turn moves on.
    pub fn user_pass(&mut self) -> Result<(), BidError> {
        if self.ended {
            return Err(BidError::AuctionEnded);
        }
        if !self.is_user_turn() {
            return Err(BidError::NotYourTurn);
        }
        self.advance_turn();
        Ok(())
    }

    fn apply_bid(&mut self, bidder_name: String, amount: i64, rng: &mut StdRng) -> bool {
        self.current_bid = amount;
        self.last_bidder_name = bidder_name;

        // The gavel may only fall once the seller is guaranteed a profit over
        // the listing.
        if amount > self.listed_price && rng.gen_bool(self.cfg.sudden_death_probability) {
            self.ended = true;
            info!(art_id = %self.art_id, final_price = amount, "gavel fell");
            return true;
        }
        self.advance_turn();
        false
    }

    fn advance_turn(&mut self) {
        self.turn = (self.turn + 1) % self.participants.len();
    }
}
