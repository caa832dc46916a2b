use crate::errors::Error;
use crate::types::{Auction, Bid, DataKey, EscrowTotals, HouseConfig};
use soroban_sdk::{Address, Env, Vec};

// TTL constants (~5 second ledger close time)
const DAY_IN_LEDGERS: u32 = 17280;
const PERSISTENT_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;
const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

// ========== Config ==========

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<HouseConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &HouseConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
}

// ========== Auction Counter ==========

pub fn get_auction_counter(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::AuctionCounter)
        .unwrap_or(0)
}

pub fn increment_auction_counter(env: &Env) -> Result<u64, Error> {
    let counter = get_auction_counter(env)
        .checked_add(1)
        .ok_or(Error::Overflow)?;
    env.storage()
        .instance()
        .set(&DataKey::AuctionCounter, &counter);
    Ok(counter)
}

// ========== Auctions ==========

pub fn get_auction(env: &Env, auction_id: u64) -> Option<Auction> {
    let key = DataKey::Auction(auction_id);
    let auction = env.storage().persistent().get::<_, Auction>(&key);
    if auction.is_some() {
        bump_persistent(env, &key);
    }
    auction
}

pub fn save_auction(env: &Env, auction: &Auction) {
    let key = DataKey::Auction(auction.auction_id);
    env.storage().persistent().set(&key, auction);
    bump_persistent(env, &key);
}

/// Up to `limit` ids in creation order, skipping the first `offset`.
pub fn list_auctions(env: &Env, offset: u64, limit: u32) -> Vec<u64> {
    let counter = get_auction_counter(env);
    let mut ids = Vec::new(env);
    let first = match offset.checked_add(1) {
        Some(first) => first,
        None => return ids,
    };
    for id in (first..=counter).take(limit as usize) {
        ids.push_back(id);
    }
    ids
}

// ========== Bid History ==========

pub fn get_bid_history(env: &Env, auction_id: u64) -> Vec<Bid> {
    let key = DataKey::BidHistory(auction_id);
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env))
}

pub fn add_bid_to_history(env: &Env, auction_id: u64, bid: Bid) {
    let key = DataKey::BidHistory(auction_id);
    let mut history = get_bid_history(env, auction_id);
    history.push_back(bid);
    env.storage().persistent().set(&key, &history);
    bump_persistent(env, &key);
}

// ========== Participant Indexes ==========

pub fn get_seller_auctions(env: &Env, seller: &Address) -> Vec<u64> {
    let key = DataKey::SellerAuctions(seller.clone());
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env))
}

pub fn add_seller_auction(env: &Env, seller: &Address, auction_id: u64) {
    let key = DataKey::SellerAuctions(seller.clone());
    let mut ids = get_seller_auctions(env, seller);
    ids.push_back(auction_id);
    env.storage().persistent().set(&key, &ids);
    bump_persistent(env, &key);
}

pub fn get_bidder_auctions(env: &Env, bidder: &Address) -> Vec<u64> {
    let key = DataKey::BidderAuctions(bidder.clone());
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env))
}

/// Records `auction_id` against `bidder` unless it is already listed.
pub fn add_bidder_auction(env: &Env, bidder: &Address, auction_id: u64) {
    let mut ids = get_bidder_auctions(env, bidder);
    if ids.contains(auction_id) {
        return;
    }
    ids.push_back(auction_id);
    let key = DataKey::BidderAuctions(bidder.clone());
    env.storage().persistent().set(&key, &ids);
    bump_persistent(env, &key);
}

// ========== Escrow Balances ==========

pub fn get_balance(env: &Env, auction_id: u64, participant: &Address) -> i128 {
    let key = DataKey::Balance(auction_id, participant.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

/// Zero balances are removed rather than stored.
pub fn set_balance(env: &Env, auction_id: u64, participant: &Address, amount: i128) {
    let key = DataKey::Balance(auction_id, participant.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        bump_persistent(env, &key);
    }
}

pub fn get_escrow_totals(env: &Env, auction_id: u64) -> EscrowTotals {
    let key = DataKey::EscrowTotals(auction_id);
    env.storage().persistent().get(&key).unwrap_or_default()
}

pub fn set_escrow_totals(env: &Env, auction_id: u64, totals: &EscrowTotals) {
    let key = DataKey::EscrowTotals(auction_id);
    env.storage().persistent().set(&key, totals);
    bump_persistent(env, &key);
}

// ========== Per-Auction Guard ==========

pub fn is_locked(env: &Env, auction_id: u64) -> bool {
    env.storage().temporary().has(&DataKey::Lock(auction_id))
}

pub fn lock(env: &Env, auction_id: u64) {
    env.storage().temporary().set(&DataKey::Lock(auction_id), &true);
}

pub fn unlock(env: &Env, auction_id: u64) {
    env.storage().temporary().remove(&DataKey::Lock(auction_id));
}
