//! Auction house events.
//!
//! Every payload is a `#[contracttype]` struct published under a short
//! topic followed by the auction id, so notification consumers can filter
//! per auction and rely on ledger order within it.

use crate::types::{ItemStatus, Resolution};
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

pub const TOPIC_HOUSE_INITIALIZED: Symbol = symbol_short!("init");
pub const TOPIC_ARBITRATOR_CHANGED: Symbol = symbol_short!("arb_set");
pub const TOPIC_ADMIN_CHANGED: Symbol = symbol_short!("admin_set");

pub const TOPIC_AUCTION_CREATED: Symbol = symbol_short!("created");
pub const TOPIC_NEW_HIGHEST_BID: Symbol = symbol_short!("new_bid");
pub const TOPIC_BID_REFUNDED: Symbol = symbol_short!("refunded");
pub const TOPIC_REFUND_DEFERRED: Symbol = symbol_short!("rfd_defer");
pub const TOPIC_AUCTION_ENDED: Symbol = symbol_short!("ended");
pub const TOPIC_ITEM_CONFIRMED: Symbol = symbol_short!("confirmed");
pub const TOPIC_DISPUTE_INITIATED: Symbol = symbol_short!("disputed");
pub const TOPIC_DISPUTE_RESOLVED: Symbol = symbol_short!("resolved");
pub const TOPIC_FUNDS_RELEASED: Symbol = symbol_short!("released");
pub const TOPIC_PAYOUT_DEFERRED: Symbol = symbol_short!("pay_defer");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HouseInitializedEvent {
    pub admin: Address,
    pub arbitrator: Address,
    pub token: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArbitratorChangedEvent {
    pub old_arbitrator: Address,
    pub new_arbitrator: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChangedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionCreatedEvent {
    pub auction_id: u64,
    pub seller: Address,
    pub item_name: String,
    pub starting_bid: i128,
    pub end_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewHighestBidEvent {
    pub auction_id: u64,
    pub bidder: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Emitted for an outbid refund or a pull withdrawal that reached the bidder.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidRefundedEvent {
    pub auction_id: u64,
    pub bidder: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundDeferredEvent {
    pub auction_id: u64,
    pub bidder: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionEndedEvent {
    pub auction_id: u64,
    pub winner: Option<Address>,
    pub amount: i128,
    pub confirmation_deadline: Option<u64>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemConfirmedEvent {
    pub auction_id: u64,
    pub bidder: Address,
    pub by_lapse: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeInitiatedEvent {
    pub auction_id: u64,
    pub bidder: Address,
    pub item_status: ItemStatus,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeResolvedEvent {
    pub auction_id: u64,
    pub arbitrator: Address,
    pub resolution: Resolution,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsReleasedEvent {
    pub auction_id: u64,
    pub recipient: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutDeferredEvent {
    pub auction_id: u64,
    pub recipient: Address,
    pub amount: i128,
}

// ========== House ==========

#[allow(deprecated)]
pub fn emit_house_initialized(env: &Env, admin: Address, arbitrator: Address, token: Address) {
    let event = HouseInitializedEvent {
        admin,
        arbitrator,
        token,
    };
    env.events().publish((TOPIC_HOUSE_INITIALIZED,), event);
}

#[allow(deprecated)]
pub fn emit_arbitrator_changed(env: &Env, old_arbitrator: Address, new_arbitrator: Address) {
    let event = ArbitratorChangedEvent {
        old_arbitrator,
        new_arbitrator,
    };
    env.events().publish((TOPIC_ARBITRATOR_CHANGED,), event);
}

#[allow(deprecated)]
pub fn emit_admin_changed(env: &Env, old_admin: Address, new_admin: Address) {
    let event = AdminChangedEvent {
        old_admin,
        new_admin,
    };
    env.events().publish((TOPIC_ADMIN_CHANGED,), event);
}

// ========== Bidding ==========

#[allow(deprecated)]
pub fn emit_auction_created(
    env: &Env,
    auction_id: u64,
    seller: Address,
    item_name: String,
    starting_bid: i128,
    end_time: u64,
) {
    let event = AuctionCreatedEvent {
        auction_id,
        seller: seller.clone(),
        item_name,
        starting_bid,
        end_time,
    };
    env.events()
        .publish((TOPIC_AUCTION_CREATED, auction_id, seller), event);
}

#[allow(deprecated)]
pub fn emit_new_highest_bid(env: &Env, auction_id: u64, bidder: Address, amount: i128) {
    let event = NewHighestBidEvent {
        auction_id,
        bidder: bidder.clone(),
        amount,
        timestamp: env.ledger().timestamp(),
    };
    env.events()
        .publish((TOPIC_NEW_HIGHEST_BID, auction_id, bidder), event);
}

#[allow(deprecated)]
pub fn emit_bid_refunded(env: &Env, auction_id: u64, bidder: Address, amount: i128) {
    let event = BidRefundedEvent {
        auction_id,
        bidder: bidder.clone(),
        amount,
    };
    env.events()
        .publish((TOPIC_BID_REFUNDED, auction_id, bidder), event);
}

#[allow(deprecated)]
pub fn emit_refund_deferred(env: &Env, auction_id: u64, bidder: Address) {
    let event = RefundDeferredEvent {
        auction_id,
        bidder: bidder.clone(),
    };
    env.events()
        .publish((TOPIC_REFUND_DEFERRED, auction_id, bidder), event);
}

// ========== Settlement ==========

#[allow(deprecated)]
pub fn emit_auction_ended(
    env: &Env,
    auction_id: u64,
    winner: Option<Address>,
    amount: i128,
    confirmation_deadline: Option<u64>,
) {
    let event = AuctionEndedEvent {
        auction_id,
        winner,
        amount,
        confirmation_deadline,
    };
    env.events().publish((TOPIC_AUCTION_ENDED, auction_id), event);
}

#[allow(deprecated)]
pub fn emit_item_confirmed(env: &Env, auction_id: u64, bidder: Address, by_lapse: bool) {
    let event = ItemConfirmedEvent {
        auction_id,
        bidder: bidder.clone(),
        by_lapse,
    };
    env.events()
        .publish((TOPIC_ITEM_CONFIRMED, auction_id, bidder), event);
}

#[allow(deprecated)]
pub fn emit_dispute_initiated(env: &Env, auction_id: u64, bidder: Address) {
    let event = DisputeInitiatedEvent {
        auction_id,
        bidder: bidder.clone(),
        item_status: ItemStatus::Disputed,
    };
    env.events()
        .publish((TOPIC_DISPUTE_INITIATED, auction_id, bidder), event);
}

#[allow(deprecated)]
pub fn emit_dispute_resolved(env: &Env, auction_id: u64, arbitrator: Address, resolution: Resolution) {
    let event = DisputeResolvedEvent {
        auction_id,
        arbitrator: arbitrator.clone(),
        resolution,
    };
    env.events()
        .publish((TOPIC_DISPUTE_RESOLVED, auction_id, arbitrator), event);
}

#[allow(deprecated)]
pub fn emit_funds_released(env: &Env, auction_id: u64, recipient: Address, amount: i128) {
    let event = FundsReleasedEvent {
        auction_id,
        recipient: recipient.clone(),
        amount,
    };
    env.events()
        .publish((TOPIC_FUNDS_RELEASED, auction_id, recipient), event);
}

#[allow(deprecated)]
pub fn emit_payout_deferred(env: &Env, auction_id: u64, recipient: Address, amount: i128) {
    let event = PayoutDeferredEvent {
        auction_id,
        recipient: recipient.clone(),
        amount,
    };
    env.events()
        .publish((TOPIC_PAYOUT_DEFERRED, auction_id, recipient), event);
}
