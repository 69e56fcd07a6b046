use artmint_core::{AdminSet, PaymentConfig, PlatformConfig};
use settlement::*;

#[test]
fn test_split_then_settle_conserves_the_sale() {
    let mut payment = PaymentConfig::for_artist("artist");
    payment.additional_primary_address = "studio".to_string();
    payment.additional_primary_percentage = 25;
    let platform = PlatformConfig::new("platform");

    let gross = 987_654_321;
    let split = primary_split(&payment, &platform, gross);
    assert_eq!(split.total(), gross);

    let mut ledger = Ledger::new();
    ledger.deposit("buyer", gross);
    ledger.settle("buyer", &split.payouts()).unwrap();

    assert_eq!(ledger.balance("buyer"), 0);
    assert_eq!(
        ledger.balance("platform") + ledger.balance("studio") + ledger.balance("artist"),
        gross
    );
    assert_eq!(ledger.balance("platform"), split.platform_amount);
    assert_eq!(ledger.balance("studio"), split.additional_amount);
    assert_eq!(ledger.balance("artist"), split.artist_amount);
}

#[test]
fn test_no_zero_value_transfers_are_attempted() {
    // artist share of zero must never reach the ledger
    let mut payment = PaymentConfig::for_artist("artist");
    payment.additional_primary_address = "studio".to_string();
    payment.additional_primary_percentage = 100;
    let platform = PlatformConfig::new("platform");

    let split = primary_split(&payment, &platform, 1_000_000);
    let payouts = split.payouts();
    assert!(payouts.iter().all(|p| p.to != "artist"));

    let mut ledger = Ledger::new();
    ledger.deposit("buyer", 1_000_000);
    ledger.settle("buyer", &payouts).unwrap();
    assert_eq!(ledger.balance("artist"), 0);
    assert_eq!(ledger.balance("studio"), 900_000);
}

#[test]
fn test_royalty_budget_composition() {
    let roles = AdminSet::new("deployer");
    let mut platform = PlatformConfig::new("platform");
    platform
        .set_secondary_sales_bps("deployer", &roles, 240)
        .unwrap();

    let mut payment = PaymentConfig::for_artist("artist");
    payment.additional_secondary_address = "studio".to_string();
    payment.additional_secondary_percentage = 51;

    let shares = secondary_split(&payment, &platform, 10);
    let artist_side: u64 = shares
        .iter()
        .filter(|s| s.recipient != "platform")
        .map(|s| s.bps)
        .sum();
    assert_eq!(artist_side, 1000);
    assert_eq!(shares.last().unwrap().bps, 240);
}
