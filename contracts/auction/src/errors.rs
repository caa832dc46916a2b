use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidState = 4,
    BidTooLow = 5,
    InsufficientBalance = 6,
    TransferFailed = 7,
    AuctionNotFound = 8,
    InvalidAmount = 9,
    InvalidDuration = 10,
    InvalidItemName = 11,
    InvalidConfig = 12,
    Reentrant = 13,
    Overflow = 14,
    InvalidInput = 15,
}
