#![no_std]

//! # Escrow Auction House
//!
//! Soroban contract hosting English auctions whose bids are custodied in
//! escrow until the winner confirms receipt of the item, the confirmation
//! window lapses, or an arbitrator resolves a dispute.
//!
//! ## Lifecycle
//!
//! ```text
//! Open ──end_auction──▶ Ended ──confirm_receipt────────▶ Confirmed
//!                         │   └─release_after_deadline─▶ Confirmed
//!                         └──initiate_dispute──▶ Disputed ──resolve_dispute──▶ Resolved
//! ```
//!
//! An auction ended without bids is terminal (`Unsold`).
//!
//! ## Modules
//!
//! - [`escrow`]: [`EscrowLedger`], the only code that moves tokens.
//! - [`rules`]: deadline, increment and phase predicates.
//! - [`roles`]: seller / winner / arbitrator / admin checks.
//! - [`events`]: event payloads and emitters.

use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Vec};

mod errors;
pub mod escrow;
pub mod events;
mod roles;
pub mod rules;
mod storage;
mod types;

pub use errors::Error;
pub use escrow::{EscrowLedger, Payout};
pub use types::{
    Auction, AuctionDetails, AuctionPhase, Bid, EscrowTotals, HouseConfig, ItemStatus, Resolution,
};

/// Confirmation window suggested for deployments: seven days.
pub const DEFAULT_CONFIRM_WINDOW: u64 = 7 * 24 * 60 * 60;

pub const MAX_ITEM_NAME_LEN: u32 = 128;

/// Largest page [`AuctionHouse::list_auctions`] returns.
pub const MAX_PAGE_SIZE: u32 = 100;

#[contract]
pub struct AuctionHouse;

#[contractimpl]
impl AuctionHouse {
    // ========== INITIALIZATION ==========

    /// Configure the house. `token` is the asset every auction is settled in;
    /// `arbitrator` is snapshotted into each auction created afterwards.
    pub fn initialize(
        env: Env,
        admin: Address,
        arbitrator: Address,
        token: Address,
        min_increment: i128,
        confirm_window: u64,
    ) -> Result<(), Error> {
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        if min_increment <= 0 || confirm_window == 0 {
            return Err(Error::InvalidConfig);
        }

        let config = HouseConfig {
            admin: admin.clone(),
            arbitrator: arbitrator.clone(),
            token: token.clone(),
            min_increment,
            confirm_window,
        };
        storage::set_config(&env, &config);

        events::emit_house_initialized(&env, admin, arbitrator, token);
        Ok(())
    }

    // ========== ADMINISTRATION ==========

    /// Replace the arbitrator for auctions created from now on. Existing
    /// auctions keep the arbitrator they were created with.
    pub fn set_arbitrator(env: Env, admin: Address, arbitrator: Address) -> Result<(), Error> {
        let mut config = storage::get_config(&env)?;
        roles::require_admin(&config, &admin)?;

        let old = config.arbitrator.clone();
        config.arbitrator = arbitrator.clone();
        storage::set_config(&env, &config);

        events::emit_arbitrator_changed(&env, old, arbitrator);
        Ok(())
    }

    pub fn set_admin(env: Env, admin: Address, new_admin: Address) -> Result<(), Error> {
        let mut config = storage::get_config(&env)?;
        roles::require_admin(&config, &admin)?;

        config.admin = new_admin.clone();
        storage::set_config(&env, &config);

        events::emit_admin_changed(&env, admin, new_admin);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<HouseConfig, Error> {
        storage::get_config(&env)
    }

    // ========== REGISTRY ==========

    /// List a new item. Returns the auction id used by every other call.
    pub fn create_auction(
        env: Env,
        seller: Address,
        item_name: String,
        starting_bid: i128,
        duration: u64,
    ) -> Result<u64, Error> {
        let config = storage::get_config(&env)?;
        seller.require_auth();

        if starting_bid <= 0 {
            return Err(Error::InvalidAmount);
        }
        if duration == 0 {
            return Err(Error::InvalidDuration);
        }
        if item_name.len() == 0 || item_name.len() > MAX_ITEM_NAME_LEN {
            return Err(Error::InvalidItemName);
        }

        let now = env.ledger().timestamp();
        let end_time = now.checked_add(duration).ok_or(Error::Overflow)?;
        let auction_id = storage::increment_auction_counter(&env)?;

        let auction = Auction {
            auction_id,
            seller: seller.clone(),
            arbitrator: config.arbitrator,
            item_name: item_name.clone(),
            starting_bid,
            start_time: now,
            end_time,
            highest_bid: 0,
            highest_bidder: None,
            ended: false,
            confirmation_deadline: None,
            item_status: ItemStatus::WithSeller,
            item_confirmed: false,
            disputed: false,
            resolution: Resolution::Unresolved,
        };
        storage::save_auction(&env, &auction);
        storage::add_seller_auction(&env, &seller, auction_id);

        events::emit_auction_created(&env, auction_id, seller, item_name, starting_bid, end_time);
        Ok(auction_id)
    }

    /// Page through auction ids in creation order. `limit` must be between
    /// 1 and [`MAX_PAGE_SIZE`].
    pub fn list_auctions(env: Env, offset: u64, limit: u32) -> Result<Vec<u64>, Error> {
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(Error::InvalidInput);
        }
        Ok(storage::list_auctions(&env, offset, limit))
    }

    pub fn list_seller_auctions(env: Env, seller: Address) -> Vec<u64> {
        storage::get_seller_auctions(&env, &seller)
    }

    /// Auctions the bidder has placed at least one accepted bid on.
    pub fn list_bidder_auctions(env: Env, bidder: Address) -> Vec<u64> {
        storage::get_bidder_auctions(&env, &bidder)
    }

    pub fn auction_count(env: Env) -> u64 {
        storage::get_auction_counter(&env)
    }

    // ========== BIDDING ==========

    /// Place a bid of `amount`, pulled from `bidder` into escrow.
    ///
    /// The bid must reach `max(starting_bid, highest_bid + min_increment)`
    /// and arrive strictly before `end_time`. The previous leader's
    /// withdrawable balance is pushed back to them after the new bid is
    /// recorded; if their refund is rejected it stays in the ledger for
    /// [`AuctionHouse::withdraw`].
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthorized`]: the seller bidding on their own item.
    /// - [`Error::InvalidState`]: auction ended or past `end_time`.
    /// - [`Error::BidTooLow`]: below the minimum next bid.
    /// - [`Error::InsufficientBalance`]: bidder cannot cover `amount`.
    pub fn place_bid(env: Env, auction_id: u64, bidder: Address, amount: i128) -> Result<(), Error> {
        let config = storage::get_config(&env)?;
        bidder.require_auth();

        let mut auction = load(&env, auction_id)?;
        if auction.seller == bidder {
            return Err(Error::Unauthorized);
        }

        let now = env.ledger().timestamp();
        if !rules::accepts_bids(&auction, now) {
            return Err(Error::InvalidState);
        }
        if amount < rules::min_next_bid(&auction, config.min_increment)? {
            return Err(Error::BidTooLow);
        }

        enter(&env, auction_id)?;
        let ledger = EscrowLedger::new(&env, &config.token, auction_id);
        ledger.deposit(&bidder, amount)?;

        let previous = auction.highest_bidder.replace(bidder.clone());
        auction.highest_bid = amount;
        storage::save_auction(&env, &auction);
        storage::add_bid_to_history(
            &env,
            auction_id,
            Bid {
                bidder: bidder.clone(),
                amount,
                timestamp: now,
            },
        );
        storage::add_bidder_auction(&env, &bidder, auction_id);

        events::emit_new_highest_bid(&env, auction_id, bidder.clone(), amount);

        if let Some(previous) = previous {
            // A leader raising their own bid keeps the new amount locked.
            let reserved = if previous == bidder { amount } else { 0 };
            match ledger.refund_above(&previous, reserved) {
                Ok(refunded) => events::emit_bid_refunded(&env, auction_id, previous, refunded),
                Err(Error::TransferFailed) => {
                    log!(&env, "outbid refund deferred", auction_id, previous.clone());
                    events::emit_refund_deferred(&env, auction_id, previous);
                }
                Err(err) => return Err(err),
            }
        }

        exit(&env, auction_id);
        Ok(())
    }

    /// Pull withdrawal of everything `participant` is owed by this auction,
    /// excluding a live winning bid.
    ///
    /// # Errors
    ///
    /// - [`Error::InsufficientBalance`]: nothing withdrawable.
    /// - [`Error::TransferFailed`]: token rejected the transfer.
    pub fn withdraw(env: Env, auction_id: u64, participant: Address) -> Result<i128, Error> {
        let config = storage::get_config(&env)?;
        participant.require_auth();

        let auction = load(&env, auction_id)?;
        let reserved = rules::locked_amount(&auction, &participant);

        enter(&env, auction_id)?;
        let ledger = EscrowLedger::new(&env, &config.token, auction_id);
        let amount = ledger.refund_above(&participant, reserved)?;
        exit(&env, auction_id);

        events::emit_bid_refunded(&env, auction_id, participant, amount);
        Ok(amount)
    }

    // ========== SETTLEMENT ==========

    /// Close bidding. Only the seller, only once, and only at or after
    /// `end_time`. Without bids the auction finishes unsold.
    pub fn end_auction(env: Env, auction_id: u64, seller: Address) -> Result<(), Error> {
        let config = storage::get_config(&env)?;
        let mut auction = load(&env, auction_id)?;
        roles::require_seller(&auction, &seller)?;

        let now = env.ledger().timestamp();
        if !rules::can_end(&auction, now) {
            return Err(Error::InvalidState);
        }

        auction.ended = true;
        if auction.highest_bidder.is_some() {
            auction.item_status = ItemStatus::WithBidder;
            let deadline = now
                .checked_add(config.confirm_window)
                .ok_or(Error::Overflow)?;
            auction.confirmation_deadline = Some(deadline);
        }
        storage::save_auction(&env, &auction);

        events::emit_auction_ended(
            &env,
            auction_id,
            auction.highest_bidder,
            auction.highest_bid,
            auction.confirmation_deadline,
        );
        Ok(())
    }

    /// Winner confirms the item arrived; the winning bid is released to the
    /// seller.
    pub fn confirm_receipt(env: Env, auction_id: u64, bidder: Address) -> Result<(), Error> {
        let config = storage::get_config(&env)?;
        let mut auction = load(&env, auction_id)?;
        roles::require_winner(&auction, &bidder)?;

        if !rules::awaiting_confirmation(&auction) {
            return Err(Error::InvalidState);
        }

        auction.item_confirmed = true;
        storage::save_auction(&env, &auction);
        events::emit_item_confirmed(&env, auction_id, bidder.clone(), false);

        release_to_seller(&env, &config, &auction, &bidder)
    }

    /// Seller claims the winning bid once the confirmation window has passed
    /// with neither a confirmation nor a dispute.
    pub fn release_after_deadline(env: Env, auction_id: u64, seller: Address) -> Result<(), Error> {
        let config = storage::get_config(&env)?;
        let mut auction = load(&env, auction_id)?;
        roles::require_seller(&auction, &seller)?;

        let now = env.ledger().timestamp();
        if !rules::awaiting_confirmation(&auction) || rules::within_confirmation_window(&auction, now) {
            return Err(Error::InvalidState);
        }
        let winner = auction.highest_bidder.clone().ok_or(Error::InvalidState)?;

        auction.item_confirmed = true;
        storage::save_auction(&env, &auction);
        events::emit_item_confirmed(&env, auction_id, winner.clone(), true);

        release_to_seller(&env, &config, &auction, &winner)
    }

    /// Winner disputes delivery. Must happen before the confirmation
    /// deadline. No funds move.
    pub fn initiate_dispute(env: Env, auction_id: u64, bidder: Address) -> Result<(), Error> {
        let mut auction = load(&env, auction_id)?;
        roles::require_winner(&auction, &bidder)?;

        let now = env.ledger().timestamp();
        if !rules::awaiting_confirmation(&auction) || !rules::within_confirmation_window(&auction, now) {
            return Err(Error::InvalidState);
        }

        auction.disputed = true;
        auction.item_status = ItemStatus::Disputed;
        storage::save_auction(&env, &auction);

        events::emit_dispute_initiated(&env, auction_id, bidder);
        Ok(())
    }

    /// Arbitrator settles a dispute, either releasing the winning bid to
    /// the seller or refunding the winner.
    ///
    /// A refund the token rejects stays in the winner's balance for
    /// [`AuctionHouse::withdraw`]; the dispute is resolved either way.
    pub fn resolve_dispute(
        env: Env,
        auction_id: u64,
        arbitrator: Address,
        award_to_seller: bool,
    ) -> Result<(), Error> {
        let config = storage::get_config(&env)?;
        let mut auction = load(&env, auction_id)?;
        roles::require_arbitrator(&auction, &arbitrator)?;

        if !auction.disputed || rules::is_resolved(&auction) {
            return Err(Error::InvalidState);
        }
        let winner = auction.highest_bidder.clone().ok_or(Error::InvalidState)?;

        let resolution = if award_to_seller {
            Resolution::AwardedToSeller
        } else {
            Resolution::RefundedToBidder
        };
        auction.resolution = resolution;
        storage::save_auction(&env, &auction);
        events::emit_dispute_resolved(&env, auction_id, arbitrator, resolution);

        if award_to_seller {
            return release_to_seller(&env, &config, &auction, &winner);
        }

        enter(&env, auction_id)?;
        let ledger = EscrowLedger::new(&env, &config.token, auction_id);
        match ledger.refund(&winner) {
            Ok(amount) => events::emit_funds_released(&env, auction_id, winner, amount),
            Err(Error::TransferFailed) => {
                events::emit_payout_deferred(&env, auction_id, winner, auction.highest_bid)
            }
            Err(err) => return Err(err),
        }
        exit(&env, auction_id);
        Ok(())
    }

    // ========== VIEWS ==========

    pub fn get_auction(env: Env, auction_id: u64) -> Result<Auction, Error> {
        load(&env, auction_id)
    }

    pub fn get_auction_details(env: Env, auction_id: u64) -> Result<AuctionDetails, Error> {
        let auction = load(&env, auction_id)?;
        let phase = rules::phase(&auction, env.ledger().timestamp());
        Ok(AuctionDetails {
            item_name: auction.item_name,
            seller: auction.seller,
            starting_bid: auction.starting_bid,
            end_time: auction.end_time,
            ended: auction.ended,
            highest_bidder: auction.highest_bidder,
            highest_bid: auction.highest_bid,
            item_confirmed: auction.item_confirmed,
            disputed: auction.disputed,
            item_status: auction.item_status,
            confirmation_deadline: auction.confirmation_deadline,
            phase,
        })
    }

    pub fn get_bid_history(env: Env, auction_id: u64) -> Result<Vec<Bid>, Error> {
        load(&env, auction_id)?;
        Ok(storage::get_bid_history(&env, auction_id))
    }

    pub fn get_highest_bid(env: Env, auction_id: u64) -> Result<(Option<Address>, i128), Error> {
        let auction = load(&env, auction_id)?;
        Ok((auction.highest_bidder, auction.highest_bid))
    }

    /// Raw ledger balance, including a live winning bid.
    pub fn get_balance(env: Env, auction_id: u64, participant: Address) -> Result<i128, Error> {
        load(&env, auction_id)?;
        Ok(storage::get_balance(&env, auction_id, &participant))
    }

    pub fn get_withdrawable(env: Env, auction_id: u64, participant: Address) -> Result<i128, Error> {
        let auction = load(&env, auction_id)?;
        let balance = storage::get_balance(&env, auction_id, &participant);
        Ok((balance - rules::locked_amount(&auction, &participant)).max(0))
    }

    pub fn total_escrowed(env: Env, auction_id: u64) -> Result<i128, Error> {
        let config = storage::get_config(&env)?;
        load(&env, auction_id)?;
        Ok(EscrowLedger::new(&env, &config.token, auction_id).total_escrowed())
    }

    pub fn get_escrow_totals(env: Env, auction_id: u64) -> Result<EscrowTotals, Error> {
        load(&env, auction_id)?;
        Ok(storage::get_escrow_totals(&env, auction_id))
    }
}

// ========== INTERNAL HELPERS ==========

fn load(env: &Env, auction_id: u64) -> Result<Auction, Error> {
    storage::get_auction(env, auction_id).ok_or(Error::AuctionNotFound)
}

/// Take the per-auction guard around token calls. An early return with an
/// error rolls the guard back with every other write.
fn enter(env: &Env, auction_id: u64) -> Result<(), Error> {
    if storage::is_locked(env, auction_id) {
        log!(env, "re-entry rejected", auction_id);
        return Err(Error::Reentrant);
    }
    storage::lock(env, auction_id);
    Ok(())
}

fn exit(env: &Env, auction_id: u64) {
    storage::unlock(env, auction_id);
}

/// The single release of the winning bid to the seller. Callers persist the
/// terminal state before calling.
fn release_to_seller(
    env: &Env,
    config: &HouseConfig,
    auction: &Auction,
    winner: &Address,
) -> Result<(), Error> {
    enter(env, auction.auction_id)?;
    let ledger = EscrowLedger::new(env, &config.token, auction.auction_id);
    let outcome = ledger.payout(winner, &auction.seller, auction.highest_bid)?;
    exit(env, auction.auction_id);

    match outcome {
        Payout::Sent => events::emit_funds_released(
            env,
            auction.auction_id,
            auction.seller.clone(),
            auction.highest_bid,
        ),
        Payout::Deferred => events::emit_payout_deferred(
            env,
            auction.auction_id,
            auction.seller.clone(),
            auction.highest_bid,
        ),
    }
    Ok(())
}

#[cfg(test)]
mod test;
