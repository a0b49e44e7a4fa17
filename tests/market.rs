use armsim::model::{Condition, MarketError, Provenance};
use armsim::testutil::{assert_approx, fixture_catalog};
use armsim::Scenario;

#[test]
fn purchase_split_merge_round_trip() {
    let mut s = Scenario::with_catalog(fixture_catalog());
    let tanks = s.stock(2, 10, 1500.0, Condition::Good);
    let mut world = s.build();

    let half = world.split_stock(tanks, 4).unwrap();
    assert_eq!(world.stock(tanks).quantity, 6);
    assert_eq!(world.stock(half).quantity, 4);
    assert_approx(world.stock(half).purchase_price, 1500.0, 1e-9, "split price");

    world.merge_stocks(tanks, half).unwrap();
    let merged = world.stock(tanks);
    assert_eq!(merged.quantity, 10);
    assert_approx(merged.purchase_price, 1500.0, 1e-9, "merged price");
    assert_eq!(merged.condition, Condition::Good);
    assert!(!world.stocks.contains_key(&half));
}

#[test]
fn valuation_follows_condition_walk() {
    let mut s = Scenario::with_catalog(fixture_catalog());
    // Tank definition: average quality 70 → multiplier 1.2.
    let tanks = s.stock(2, 10, 1500.0, Condition::New);
    let mut world = s.build();

    let value_new = world.stock(tanks).current_market_value(&world.catalog);
    assert_approx(value_new, 1800.0 * 10.0 * 1.2 * 1.2, 1e-6, "new value");

    world.degrade_stock(tanks);
    let value_excellent = world.stock(tanks).current_market_value(&world.catalog);
    assert!(value_excellent < value_new);
    assert_approx(
        value_excellent,
        1800.0 * 10.0 * 1.0 * 1.2,
        1e-6,
        "excellent value",
    );

    // Walk to the floor; further degradation is refused.
    for _ in 0..10 {
        world.degrade_stock(tanks);
    }
    assert_eq!(world.stock(tanks).condition, Condition::Salvage);
    assert!(!world.degrade_stock(tanks));
}

#[test]
fn partial_sale_reprices_by_whole_stack() {
    let mut s = Scenario::with_catalog(fixture_catalog());
    let tanks = s.stock(2, 10, 1500.0, Condition::Good);
    let mut world = s.build();

    let whole = world.stock(tanks).current_market_value(&world.catalog);
    let proceeds = world.sell_stock(tanks, 4);
    assert_approx(proceeds, 4.0 * whole / 10.0, 1e-6, "partial proceeds");
    assert_eq!(world.stock(tanks).quantity, 6);

    // Over-ask clamps and empties the registry entry.
    let proceeds = world.sell_stock(tanks, 100);
    assert!(proceeds > 0.0);
    assert!(!world.stocks.contains_key(&tanks));
}

#[test]
fn profit_tracks_purchase_price() {
    let mut s = Scenario::with_catalog(fixture_catalog());
    // Bought cheap relative to market: positive profit.
    let bargain = s.stock(2, 5, 500.0, Condition::Excellent);
    // Bought dear: negative profit.
    let dud = s.stock(2, 5, 4000.0, Condition::Poor);
    let world = s.build();

    assert!(world.stock(bargain).potential_profit(&world.catalog) > 0.0);
    assert!(world.stock(dud).potential_profit(&world.catalog) < 0.0);
}

#[test]
fn requirement_matching_uses_tags_and_quality() {
    let mut s = Scenario::with_catalog(fixture_catalog());
    let missiles = s.stock(3, 20, 90.0, Condition::New);
    let rifles = s.stock(1, 500, 1.0, Condition::Good);
    let world = s.build();

    // Missile definition carries "guided"+"anti-tank", average 77.5.
    assert!(world.stock(missiles).can_fulfill_requirement(
        &["guided", "anti-tank"],
        70.0,
        &world.catalog
    ));
    assert!(!world.stock(missiles).can_fulfill_requirement(
        &["guided"],
        90.0,
        &world.catalog
    ));
    assert!(!world
        .stock(rifles)
        .can_fulfill_requirement(&["guided"], 0.0, &world.catalog));
}

#[test]
fn merge_rejects_mismatched_definitions() {
    let mut s = Scenario::with_catalog(fixture_catalog());
    let tanks = s.stock(2, 5, 1500.0, Condition::Good);
    let rifles = s.stock(1, 100, 1.0, Condition::Good);
    let mut world = s.build();

    assert_eq!(
        world.merge_stocks(tanks, rifles).unwrap_err(),
        MarketError::DefinitionMismatch(2, 1)
    );
    // Both stacks untouched after the refused merge.
    assert_eq!(world.stock(tanks).quantity, 5);
    assert_eq!(world.stock(rifles).quantity, 100);
}

#[test]
fn purchases_validate_against_the_catalog() {
    let mut s = Scenario::with_catalog(fixture_catalog());
    let world = s.world();
    assert_eq!(
        world
            .purchase_stock(99, 1, 1.0, Condition::New, Provenance::BlackMarket)
            .unwrap_err(),
        MarketError::UnknownDefinition(99)
    );
}
