pub mod house_test;

use crate::{AuctionHouse, AuctionHouseClient, DEFAULT_CONFIRM_WINDOW};
use soroban_sdk::{
    contract, contractimpl, contracttype,
    testutils::{Address as _, Events as _, Ledger, LedgerInfo},
    token, Address, Env, String, Val, Vec,
};

/// 0.1 of a 7-decimal asset.
pub const STARTING_BID: i128 = 1_000_000;
pub const MIN_INCREMENT: i128 = 1_000_000;
pub const DURATION: u64 = 3600;
pub const CONFIRM_WINDOW: u64 = DEFAULT_CONFIRM_WINDOW;
pub const BIDDER_FUNDS: i128 = 100_000_000;

pub struct Setup {
    pub env: Env,
    pub client: AuctionHouseClient<'static>,
    pub house: Address,
    pub admin: Address,
    pub arbitrator: Address,
    pub seller: Address,
    pub bidder1: Address,
    pub bidder2: Address,
    pub token: token::TokenClient<'static>,
}

impl Setup {
    /// Lists the standard test item and returns its id.
    pub fn create_auction(&self) -> u64 {
        self.client.create_auction(
            &self.seller,
            &String::from_str(&self.env, "Test Item"),
            &STARTING_BID,
            &DURATION,
        )
    }

    /// Asserts the ledger balances of `participants` add up to the escrow
    /// total and to the tokens the house actually holds.
    pub fn assert_conserved(&self, auction_id: u64, participants: &[&Address]) {
        let mut sum = 0;
        for participant in participants {
            sum += self.client.get_balance(&auction_id, participant);
        }
        let escrowed = self.client.total_escrowed(&auction_id);
        assert_eq!(sum, escrowed);
        assert_eq!(self.token.balance(&self.house), escrowed);

        let totals = self.client.get_escrow_totals(&auction_id);
        assert_eq!(totals.deposited - totals.disbursed, escrowed);
    }

    /// The last `n` events published by the house, oldest first. Token
    /// contract events are left out. Read before any further client call.
    pub fn house_events(&self, n: u32) -> Vec<(Vec<Val>, Val)> {
        let mut events = Vec::new(&self.env);
        for (contract, topics, data) in self.env.events().all().iter() {
            if contract == self.house {
                events.push_back((topics, data));
            }
        }
        let len = events.len();
        assert!(len >= n, "expected {} house events, found {}", n, len);
        events.slice(len - n..)
    }

    pub fn last_house_event(&self) -> (Vec<Val>, Val) {
        self.house_events(1).get_unchecked(0)
    }
}

fn base_env() -> Env {
    let env = Env::default();
    env.mock_all_auths();

    env.ledger().set(LedgerInfo {
        timestamp: 1000,
        protocol_version: 23,
        sequence_number: 1,
        network_id: Default::default(),
        base_reserve: 10,
        min_temp_entry_ttl: 100,
        min_persistent_entry_ttl: 100,
        max_entry_ttl: 3_110_400,
    });
    env
}

fn build(env: Env, token_address: Address) -> Setup {
    let house = env.register(AuctionHouse, ());
    let client = AuctionHouseClient::new(&env, &house);

    let admin = Address::generate(&env);
    let arbitrator = Address::generate(&env);
    let seller = Address::generate(&env);
    let bidder1 = Address::generate(&env);
    let bidder2 = Address::generate(&env);

    client.initialize(&admin, &arbitrator, &token_address, &MIN_INCREMENT, &CONFIRM_WINDOW);

    let token = token::TokenClient::new(&env, &token_address);
    Setup {
        env,
        client,
        house,
        admin,
        arbitrator,
        seller,
        bidder1,
        bidder2,
        token,
    }
}

/// House settled in a Stellar asset, bidders funded.
pub fn setup_test() -> Setup {
    let env = base_env();

    let token_admin = Address::generate(&env);
    let token_contract = env.register_stellar_asset_contract_v2(token_admin);
    let token_address = token_contract.address();
    let token_admin_client = token::StellarAssetClient::new(&env, &token_address);

    let setup = build(env, token_address);
    token_admin_client.mint(&setup.bidder1, &BIDDER_FUNDS);
    token_admin_client.mint(&setup.bidder2, &BIDDER_FUNDS);
    setup
}

/// House settled in [`RejectingToken`], bidders funded.
pub fn setup_rejecting() -> (Setup, RejectingTokenClient<'static>) {
    let env = base_env();

    let token_address = env.register(RejectingToken, ());
    let token_control = RejectingTokenClient::new(&env, &token_address);

    let setup = build(env, token_address);
    token_control.mint(&setup.bidder1, &BIDDER_FUNDS);
    token_control.mint(&setup.bidder2, &BIDDER_FUNDS);
    (setup, token_control)
}

pub fn advance_ledger(env: &Env, seconds: u64) {
    env.ledger().set_timestamp(env.ledger().timestamp() + seconds);
}

// ─── rejecting token ────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Balance(Address),
    Rejects(Address),
}

/// Minimal token whose recipients can be told to refuse incoming transfers.
#[contract]
pub struct RejectingToken;

#[contractimpl]
impl RejectingToken {
    pub fn mint(env: Env, to: Address, amount: i128) {
        let balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&MockKey::Balance(to), &(balance + amount));
    }

    pub fn set_rejecting(env: Env, account: Address, rejecting: bool) {
        env.storage()
            .persistent()
            .set(&MockKey::Rejects(account), &rejecting);
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&MockKey::Balance(id))
            .unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();

        let rejects: bool = env
            .storage()
            .persistent()
            .get(&MockKey::Rejects(to.clone()))
            .unwrap_or(false);
        if rejects {
            panic!("recipient rejects transfers");
        }

        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            panic!("insufficient balance");
        }
        let to_balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&MockKey::Balance(from), &(from_balance - amount));
        env.storage()
            .persistent()
            .set(&MockKey::Balance(to), &(to_balance + amount));
    }
}
