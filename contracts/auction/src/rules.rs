//! Pure predicates over an [`Auction`] and a caller-supplied ledger time.
//! Nothing here reads storage or the ledger clock.

use crate::errors::Error;
use crate::types::{Auction, AuctionPhase, ItemStatus, Resolution};
use soroban_sdk::Address;

/// Smallest bid the auction will accept next. The increment applies to the
/// first bid as well, so an untouched auction requires
/// `max(starting_bid, min_increment)`.
pub fn min_next_bid(auction: &Auction, min_increment: i128) -> Result<i128, Error> {
    let raised = auction
        .highest_bid
        .checked_add(min_increment)
        .ok_or(Error::Overflow)?;
    Ok(raised.max(auction.starting_bid))
}

/// Bids are accepted strictly before `end_time`.
pub fn accepts_bids(auction: &Auction, now: u64) -> bool {
    !auction.ended && now < auction.end_time
}

pub fn can_end(auction: &Auction, now: u64) -> bool {
    !auction.ended && now >= auction.end_time
}

/// Ended with a winner who has neither confirmed nor disputed.
pub fn awaiting_confirmation(auction: &Auction) -> bool {
    auction.ended
        && auction.item_status == ItemStatus::WithBidder
        && !auction.item_confirmed
        && !auction.disputed
}

pub fn within_confirmation_window(auction: &Auction, now: u64) -> bool {
    matches!(auction.confirmation_deadline, Some(deadline) if now < deadline)
}

pub fn is_resolved(auction: &Auction) -> bool {
    auction.resolution != Resolution::Unresolved
}

pub fn is_leader(auction: &Auction, participant: &Address) -> bool {
    auction.highest_bidder.as_ref() == Some(participant)
}

/// Portion of `participant`'s ledger balance that backs the live winning bid
/// and therefore cannot be withdrawn.
pub fn locked_amount(auction: &Auction, participant: &Address) -> i128 {
    let settled = auction.item_confirmed || is_resolved(auction);
    if is_leader(auction, participant) && !settled {
        auction.highest_bid
    } else {
        0
    }
}

pub fn phase(auction: &Auction, now: u64) -> AuctionPhase {
    if !auction.ended {
        return if now < auction.end_time {
            AuctionPhase::Open
        } else {
            AuctionPhase::BiddingClosed
        };
    }
    if auction.highest_bidder.is_none() {
        return AuctionPhase::Unsold;
    }
    if auction.item_confirmed {
        return AuctionPhase::Confirmed;
    }
    if auction.disputed {
        return if is_resolved(auction) {
            AuctionPhase::Resolved
        } else {
            AuctionPhase::Disputed
        };
    }
    AuctionPhase::AwaitingConfirmation
}
