use std::fmt;

// Domain-level errors for auction bidding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidError {
    /// Bid must exceed the current standing bid.
    BidTooLow { current_bid: i64 },
    /// Bid exceeds the user's balance.
    InsufficientFunds,
    /// It is not the user's turn to act.
    NotYourTurn,
    /// The auction has already ended.
    AuctionEnded,
}

impl fmt::Display for BidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidError::BidTooLow { current_bid } => {
                write!(f, "bid must exceed the current bid of {current_bid}")
            }
            BidError::InsufficientFunds => write!(f, "bid exceeds available balance"),
            BidError::NotYourTurn => write!(f, "it is not your turn"),
            BidError::AuctionEnded => write!(f, "the auction has already ended"),
        }
    }
}

impl std::error::Error for BidError {}
