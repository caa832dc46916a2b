//! Escrow ledger for a single auction.
//!
//! Every token movement the auction house performs goes through
//! [`EscrowLedger`]. Balances are tracked per participant and the running
//! [`EscrowTotals`] satisfy `sum(balances) == deposited - disbursed` after
//! every call. Outbound transfers follow checks-effects-interactions: the
//! balance is debited before the token is invoked and re-credited if the
//! token rejects the transfer, so an owed amount is never lost.
//!
//! The ledger never calls back into the auction state machine.

use crate::errors::Error;
use crate::storage;
use crate::types::EscrowTotals;
use soroban_sdk::{log, token, Address, Env};

/// Outcome of a push transfer out of escrow.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Payout {
    /// Tokens reached the recipient.
    Sent,
    /// The token rejected the transfer; the amount now sits in the
    /// recipient's ledger balance for pull withdrawal.
    Deferred,
}

pub struct EscrowLedger<'a> {
    env: &'a Env,
    token: &'a Address,
    auction_id: u64,
}

impl<'a> EscrowLedger<'a> {
    pub fn new(env: &'a Env, token: &'a Address, auction_id: u64) -> Self {
        Self {
            env,
            token,
            auction_id,
        }
    }

    pub fn balance_of(&self, participant: &Address) -> i128 {
        storage::get_balance(self.env, self.auction_id, participant)
    }

    pub fn totals(&self) -> EscrowTotals {
        storage::get_escrow_totals(self.env, self.auction_id)
    }

    /// Funds currently custodied for this auction.
    pub fn total_escrowed(&self) -> i128 {
        let totals = self.totals();
        totals.deposited - totals.disbursed
    }

    /// Pulls `amount` from `participant` into the contract and credits it to
    /// their balance.
    ///
    /// # Errors
    ///
    /// - [`Error::InsufficientBalance`]: the participant holds less than
    ///   `amount` of the token.
    /// - [`Error::TransferFailed`]: the token rejected the pull.
    pub fn deposit(&self, participant: &Address, amount: i128) -> Result<(), Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let client = token::TokenClient::new(self.env, self.token);
        if client.balance(participant) < amount {
            return Err(Error::InsufficientBalance);
        }
        let pulled = client.try_transfer(participant, &self.env.current_contract_address(), &amount);
        if !matches!(pulled, Ok(Ok(()))) {
            log!(self.env, "deposit rejected by token", self.auction_id, participant.clone(), amount);
            return Err(Error::TransferFailed);
        }

        self.credit(participant, amount)?;

        let mut totals = self.totals();
        totals.deposited = totals
            .deposited
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        storage::set_escrow_totals(self.env, self.auction_id, &totals);
        Ok(())
    }

    /// Returns the participant's entire balance to them.
    pub fn refund(&self, participant: &Address) -> Result<i128, Error> {
        self.refund_above(participant, 0)
    }

    /// Returns the part of the participant's balance above `reserved`.
    ///
    /// # Errors
    ///
    /// - [`Error::InsufficientBalance`]: nothing above `reserved`.
    /// - [`Error::TransferFailed`]: token rejected the transfer; the balance
    ///   is restored before returning.
    pub fn refund_above(&self, participant: &Address, reserved: i128) -> Result<i128, Error> {
        let balance = self.balance_of(participant);
        let available = balance.checked_sub(reserved).ok_or(Error::Overflow)?;
        if available <= 0 {
            return Err(Error::InsufficientBalance);
        }

        storage::set_balance(self.env, self.auction_id, participant, reserved);

        if !self.push(participant, available) {
            storage::set_balance(self.env, self.auction_id, participant, balance);
            log!(
                self.env,
                "refund rejected by token",
                self.auction_id,
                participant.clone(),
                available
            );
            return Err(Error::TransferFailed);
        }

        self.record_disbursed(available)?;
        Ok(available)
    }

    /// Moves `amount` out of `source`'s balance to `recipient`.
    ///
    /// The caller is responsible for invoking this at most once per
    /// settlement. If the token rejects the transfer the amount is credited
    /// to `recipient` in the ledger instead.
    pub fn payout(&self, source: &Address, recipient: &Address, amount: i128) -> Result<Payout, Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let balance = self.balance_of(source);
        if balance < amount {
            return Err(Error::InsufficientBalance);
        }
        storage::set_balance(self.env, self.auction_id, source, balance - amount);

        if self.push(recipient, amount) {
            self.record_disbursed(amount)?;
            return Ok(Payout::Sent);
        }

        self.credit(recipient, amount)?;
        log!(
            self.env,
            "payout deferred to pull withdrawal",
            self.auction_id,
            recipient.clone(),
            amount
        );
        Ok(Payout::Deferred)
    }

    fn credit(&self, participant: &Address, amount: i128) -> Result<(), Error> {
        let balance = self
            .balance_of(participant)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        storage::set_balance(self.env, self.auction_id, participant, balance);
        Ok(())
    }

    fn record_disbursed(&self, amount: i128) -> Result<(), Error> {
        let mut totals = self.totals();
        totals.disbursed = totals
            .disbursed
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        storage::set_escrow_totals(self.env, self.auction_id, &totals);
        Ok(())
    }

    /// Attempts the outbound token transfer without trapping on rejection.
    fn push(&self, recipient: &Address, amount: i128) -> bool {
        let client = token::TokenClient::new(self.env, self.token);
        matches!(
            client.try_transfer(&self.env.current_contract_address(), recipient, &amount),
            Ok(Ok(()))
        )
    }
}
