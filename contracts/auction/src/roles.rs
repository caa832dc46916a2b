use crate::errors::Error;
use crate::rules;
use crate::types::{Auction, HouseConfig};
use soroban_sdk::Address;

pub fn require_admin(config: &HouseConfig, admin: &Address) -> Result<(), Error> {
    admin.require_auth();
    if config.admin != *admin {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

pub fn require_seller(auction: &Auction, seller: &Address) -> Result<(), Error> {
    seller.require_auth();
    if auction.seller != *seller {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// The current highest bidder. Before any bid there is no winner, so every
/// caller is rejected.
pub fn require_winner(auction: &Auction, bidder: &Address) -> Result<(), Error> {
    bidder.require_auth();
    if !rules::is_leader(auction, bidder) {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// The arbitrator fixed on the auction when it was created.
pub fn require_arbitrator(auction: &Auction, arbitrator: &Address) -> Result<(), Error> {
    arbitrator.require_auth();
    if auction.arbitrator != *arbitrator {
        return Err(Error::Unauthorized);
    }
    Ok(())
}
