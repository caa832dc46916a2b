use crate::test::{setup_test, CONFIRM_WINDOW, DURATION, MIN_INCREMENT, STARTING_BID};
use crate::events::{AuctionCreatedEvent, TOPIC_AUCTION_CREATED};
use crate::{AuctionHouse, AuctionHouseClient, AuctionPhase, Error, ItemStatus, Resolution, MAX_PAGE_SIZE};
use soroban_sdk::{testutils::Address as _, Address, Env, IntoVal, String, TryFromVal, Val, Vec};

#[test]
fn test_initialize_stores_config() {
    let s = setup_test();
    let config = s.client.get_config();
    assert_eq!(config.admin, s.admin);
    assert_eq!(config.arbitrator, s.arbitrator);
    assert_eq!(config.token, s.token.address);
    assert_eq!(config.min_increment, MIN_INCREMENT);
    assert_eq!(config.confirm_window, CONFIRM_WINDOW);
}

#[test]
fn test_double_initialization_fails() {
    let s = setup_test();
    let result = s.client.try_initialize(
        &s.admin,
        &s.arbitrator,
        &s.token.address,
        &MIN_INCREMENT,
        &CONFIRM_WINDOW,
    );
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
}

#[test]
fn test_initialize_rejects_invalid_config() {
    let env = Env::default();
    env.mock_all_auths();
    let client = AuctionHouseClient::new(&env, &env.register(AuctionHouse, ()));
    let admin = Address::generate(&env);
    let arbitrator = Address::generate(&env);
    let token = Address::generate(&env);

    let result = client.try_initialize(&admin, &arbitrator, &token, &0, &CONFIRM_WINDOW);
    assert_eq!(result, Err(Ok(Error::InvalidConfig)));

    let result = client.try_initialize(&admin, &arbitrator, &token, &MIN_INCREMENT, &0);
    assert_eq!(result, Err(Ok(Error::InvalidConfig)));
}

#[test]
fn test_uninitialized_house_rejects_listings() {
    let env = Env::default();
    env.mock_all_auths();
    let client = AuctionHouseClient::new(&env, &env.register(AuctionHouse, ()));
    let seller = Address::generate(&env);

    let result = client.try_create_auction(
        &seller,
        &String::from_str(&env, "Lamp"),
        &STARTING_BID,
        &DURATION,
    );
    assert_eq!(result, Err(Ok(Error::NotInitialized)));
    assert_eq!(client.try_get_config(), Err(Ok(Error::NotInitialized)));
}

#[test]
fn test_create_auction() {
    let s = setup_test();
    let auction_id = s.create_auction();
    assert_eq!(auction_id, 1);

    let (topics, data) = s.last_house_event();
    let expected: Vec<Val> = (TOPIC_AUCTION_CREATED, auction_id, s.seller.clone()).into_val(&s.env);
    assert_eq!(topics, expected);
    assert_eq!(
        AuctionCreatedEvent::try_from_val(&s.env, &data).unwrap(),
        AuctionCreatedEvent {
            auction_id,
            seller: s.seller.clone(),
            item_name: String::from_str(&s.env, "Test Item"),
            starting_bid: STARTING_BID,
            end_time: 1000 + DURATION,
        }
    );

    let auction = s.client.get_auction(&auction_id);
    assert_eq!(auction.seller, s.seller);
    assert_eq!(auction.arbitrator, s.arbitrator);
    assert_eq!(auction.starting_bid, STARTING_BID);
    assert_eq!(auction.start_time, 1000);
    assert_eq!(auction.end_time, 1000 + DURATION);
    assert_eq!(auction.highest_bidder, None);
    assert_eq!(auction.resolution, Resolution::Unresolved);

    let details = s.client.get_auction_details(&auction_id);
    assert_eq!(details.item_name, String::from_str(&s.env, "Test Item"));
    assert_eq!(details.highest_bid, 0);
    assert!(!details.ended);
    assert!(!details.item_confirmed);
    assert!(!details.disputed);
    assert_eq!(details.item_status, ItemStatus::WithSeller);
    assert_eq!(details.confirmation_deadline, None);
    assert_eq!(details.phase, AuctionPhase::Open);
    assert_eq!(s.client.get_bid_history(&auction_id).len(), 0);
}

#[test]
fn test_create_auction_validation() {
    let s = setup_test();
    let name = String::from_str(&s.env, "Lamp");

    let result = s.client.try_create_auction(&s.seller, &name, &0, &DURATION);
    assert_eq!(result, Err(Ok(Error::InvalidAmount)));

    let result = s.client.try_create_auction(&s.seller, &name, &STARTING_BID, &0);
    assert_eq!(result, Err(Ok(Error::InvalidDuration)));

    let empty = String::from_str(&s.env, "");
    let result = s.client.try_create_auction(&s.seller, &empty, &STARTING_BID, &DURATION);
    assert_eq!(result, Err(Ok(Error::InvalidItemName)));

    assert_eq!(s.client.auction_count(), 0);
}

#[test]
fn test_list_auctions() {
    let s = setup_test();
    let other_seller = Address::generate(&s.env);

    let first = s.create_auction();
    let second = s.client.create_auction(
        &other_seller,
        &String::from_str(&s.env, "Chair"),
        &STARTING_BID,
        &DURATION,
    );
    let third = s.create_auction();

    assert_eq!(s.client.auction_count(), 3);

    let all = s.client.list_auctions(&0, &MAX_PAGE_SIZE);
    assert_eq!(all.len(), 3);
    assert_eq!(all.get(0), Some(first));
    assert_eq!(all.get(1), Some(second));
    assert_eq!(all.get(2), Some(third));

    let mine = s.client.list_seller_auctions(&s.seller);
    assert_eq!(mine.len(), 2);
    assert_eq!(mine.get(0), Some(first));
    assert_eq!(mine.get(1), Some(third));
    assert_eq!(s.client.list_seller_auctions(&other_seller).len(), 1);
}

#[test]
fn test_get_auction_not_found() {
    let s = setup_test();
    assert_eq!(s.client.try_get_auction(&999), Err(Ok(Error::AuctionNotFound)));
    assert_eq!(s.client.try_get_bid_history(&999), Err(Ok(Error::AuctionNotFound)));
    assert_eq!(s.client.try_total_escrowed(&999), Err(Ok(Error::AuctionNotFound)));
}

#[test]
fn test_set_arbitrator_applies_to_new_auctions_only() {
    let s = setup_test();
    let before = s.create_auction();

    let new_arbitrator = Address::generate(&s.env);
    s.client.set_arbitrator(&s.admin, &new_arbitrator);
    let after = s.create_auction();

    assert_eq!(s.client.get_auction(&before).arbitrator, s.arbitrator);
    assert_eq!(s.client.get_auction(&after).arbitrator, new_arbitrator);
    assert_eq!(s.client.get_config().arbitrator, new_arbitrator);
}

#[test]
fn test_admin_operations_require_admin() {
    let s = setup_test();
    let stranger = Address::generate(&s.env);

    let result = s.client.try_set_arbitrator(&stranger, &stranger);
    assert_eq!(result, Err(Ok(Error::Unauthorized)));

    let result = s.client.try_set_admin(&stranger, &stranger);
    assert_eq!(result, Err(Ok(Error::Unauthorized)));

    let new_admin = Address::generate(&s.env);
    s.client.set_admin(&s.admin, &new_admin);
    assert_eq!(s.client.get_config().admin, new_admin);

    let result = s.client.try_set_arbitrator(&s.admin, &stranger);
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
}

#[test]
fn test_list_auctions_pages() {
    let s = setup_test();
    for _ in 0..5 {
        s.create_auction();
    }

    let page = s.client.list_auctions(&0, &2);
    assert_eq!(page.len(), 2);
    assert_eq!(page.get(0), Some(1));
    assert_eq!(page.get(1), Some(2));

    let page = s.client.list_auctions(&2, &2);
    assert_eq!(page.get(0), Some(3));
    assert_eq!(page.get(1), Some(4));

    let page = s.client.list_auctions(&4, &2);
    assert_eq!(page.len(), 1);
    assert_eq!(page.get(0), Some(5));

    assert_eq!(s.client.list_auctions(&5, &2).len(), 0);
    assert_eq!(s.client.list_auctions(&u64::MAX, &2).len(), 0);

    let result = s.client.try_list_auctions(&0, &0);
    assert_eq!(result, Err(Ok(Error::InvalidInput)));
    let result = s.client.try_list_auctions(&0, &(MAX_PAGE_SIZE + 1));
    assert_eq!(result, Err(Ok(Error::InvalidInput)));
}
