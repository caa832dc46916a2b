use soroban_sdk::{contracttype, Address, String};

/// Where the physical item is considered to be.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ItemStatus {
    WithSeller = 0,
    WithBidder = 1,
    Disputed = 2,
}

/// Outcome recorded by the arbitrator. `Unresolved` until a dispute is
/// settled.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Resolution {
    Unresolved = 0,
    AwardedToSeller = 1,
    RefundedToBidder = 2,
}

/// Derived lifecycle position of an auction at a given ledger time.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuctionPhase {
    Open = 0,
    BiddingClosed = 1,
    Unsold = 2,
    AwaitingConfirmation = 3,
    Confirmed = 4,
    Disputed = 5,
    Resolved = 6,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Auction {
    pub auction_id: u64,
    pub seller: Address,
    pub arbitrator: Address,
    pub item_name: String,
    pub starting_bid: i128,
    pub start_time: u64,
    pub end_time: u64,
    pub highest_bid: i128,
    pub highest_bidder: Option<Address>,
    pub ended: bool,
    pub confirmation_deadline: Option<u64>,
    pub item_status: ItemStatus,
    pub item_confirmed: bool,
    pub disputed: bool,
    pub resolution: Resolution,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Bid {
    pub bidder: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Read-only summary served to listing front-ends.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct AuctionDetails {
    pub item_name: String,
    pub seller: Address,
    pub starting_bid: i128,
    pub end_time: u64,
    pub ended: bool,
    pub highest_bidder: Option<Address>,
    pub highest_bid: i128,
    pub item_confirmed: bool,
    pub disputed: bool,
    pub item_status: ItemStatus,
    pub confirmation_deadline: Option<u64>,
    pub phase: AuctionPhase,
}

/// House-wide settings fixed at initialization.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct HouseConfig {
    pub admin: Address,
    pub arbitrator: Address,
    pub token: Address,
    pub min_increment: i128,
    pub confirm_window: u64,
}

/// Running ledger totals for one auction. `deposited - disbursed` is the
/// amount the contract custodies on the auction's behalf.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EscrowTotals {
    pub deposited: i128,
    pub disbursed: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    AuctionCounter,
    Auction(u64),
    BidHistory(u64),
    SellerAuctions(Address),
    BidderAuctions(Address),
    Balance(u64, Address),
    EscrowTotals(u64),
    Lock(u64),
}
