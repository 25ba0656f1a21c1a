//! Delivery estimates for carts built from the demo fixture set.
//!
//! Customer `c-aoife` lives in the North area. Pasta Palace and Slice of Napoli are
//! North restaurants, Sushi Stop is East and Burger Barn is West.

use rusty_money::{Money, iso::EUR};
use testresult::TestResult;

use nomnom::prelude::*;

fn demo() -> Result<Catalog<'static>, CatalogError> {
    Catalog::from_set_in(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures"), "demo")
}

fn cart_of(catalog: &Catalog<'static>, dishes: &[(&str, u32)]) -> TestResult<Cart<'static>> {
    let lines = dishes
        .iter()
        .map(|&(id, quantity)| catalog.cart_line(catalog.dish_key(id)?, quantity))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Cart::with_lines(lines, catalog.currency()?)?)
}

fn customer_area(catalog: &Catalog<'static>, id: &str) -> TestResult<Area> {
    let key = catalog.customer_key(id)?;

    Ok(catalog.customer(key).ok_or("customer missing")?.area)
}

#[test]
fn two_areas_scenario() -> TestResult {
    let catalog = demo()?;
    let cart = cart_of(&catalog, &[("d-carbonara", 2), ("d-maki", 1)])?;

    let estimate = estimate(customer_area(&catalog, "c-aoife")?, &cart);

    assert_eq!(estimate.total_cost(), Money::from_minor(3250, EUR));
    assert_eq!(estimate.prep_minutes(), 20);
    assert_eq!(estimate.pickup_minutes(), 15);
    assert_eq!(estimate.delivery_minutes(), 10);
    assert_eq!(estimate.estimated_minutes(), 45);

    let prep: Vec<u32> = estimate.legs().iter().map(|leg| leg.prep_minutes).collect();
    assert_eq!(prep, vec![15, 20]);

    Ok(())
}

#[test]
fn single_restaurant_in_area() -> TestResult {
    let catalog = demo()?;
    let cart = cart_of(&catalog, &[("d-margherita", 1)])?;

    let estimate = estimate(customer_area(&catalog, "c-aoife")?, &cart);

    assert_eq!(estimate.total_cost(), Money::from_minor(900, EUR));
    assert_eq!(estimate.estimated_minutes(), 14 + 5 + 5);

    Ok(())
}

#[test]
fn same_restaurant_lines_share_the_slowest_prep() -> TestResult {
    let catalog = demo()?;
    let cart = cart_of(&catalog, &[("d-carbonara", 1), ("d-pesto", 3)])?;

    let estimate = estimate(Area::North, &cart);

    assert_eq!(estimate.legs().len(), 1);
    assert_eq!(estimate.prep_minutes(), 15);
    assert_eq!(estimate.pickup_minutes(), 5);

    Ok(())
}

#[test]
fn pickups_add_up_per_restaurant() -> TestResult {
    let catalog = demo()?;

    let both_local = cart_of(&catalog, &[("d-carbonara", 1), ("d-margherita", 1)])?;
    assert_eq!(estimate(Area::North, &both_local).pickup_minutes(), 10);
    assert_eq!(estimate(Area::North, &both_local).delivery_minutes(), 5);

    let mixed = cart_of(&catalog, &[("d-carbonara", 1), ("d-smash", 1)])?;
    assert_eq!(estimate(Area::North, &mixed).pickup_minutes(), 15);

    Ok(())
}

#[test]
fn one_distant_restaurant_sets_the_delivery_leg() -> TestResult {
    let catalog = demo()?;
    let cart = cart_of(
        &catalog,
        &[("d-carbonara", 1), ("d-margherita", 1), ("d-maki", 1), ("d-smash", 1)],
    )?;

    let estimate = estimate(Area::North, &cart);

    assert_eq!(estimate.delivery_minutes(), 10);
    assert_eq!(estimate.pickup_minutes(), 5 + 5 + 10 + 10);

    Ok(())
}

#[test]
fn empty_cart_costs_nothing() -> TestResult {
    let catalog = demo()?;
    let cart = Cart::new(catalog.currency()?);

    let estimate = estimate(Area::East, &cart);

    assert_eq!(estimate.total_cost(), Money::from_minor(0, EUR));
    assert_eq!(estimate.estimated_minutes(), 0);
    assert!(estimate.legs().is_empty());

    Ok(())
}

#[test]
fn adding_lines_never_lowers_the_total() -> TestResult {
    let catalog = demo()?;
    let mut cart = Cart::new(catalog.currency()?);
    let mut previous = estimate(Area::West, &cart).total_cost().to_minor_units();

    for id in ["d-shake", "d-smash", "d-ramen", "d-shake", "d-pesto"] {
        let key = catalog.dish_key(id)?;
        let dish = catalog.dish(key).ok_or("dish missing")?;

        cart = cart.add_dish(key, dish)?;

        let total = estimate(Area::West, &cart).total_cost().to_minor_units();
        assert!(total >= previous);
        previous = total;
    }

    assert_eq!(cart.item_count(), 5);
    assert_eq!(cart.len(), 4);

    Ok(())
}

#[test]
fn custom_policy_changes_the_minutes() -> TestResult {
    let catalog = demo()?;
    let cart = cart_of(&catalog, &[("d-carbonara", 2), ("d-maki", 1)])?;

    let calculator = EstimateCalculator {
        same_area_pickup_minutes: 10,
        different_area_pickup_minutes: 20,
        same_area_delivery_minutes: 10,
        different_area_delivery_minutes: 25,
    };

    let estimate = calculator.estimate(Area::North, &cart);

    assert_eq!(estimate.estimated_minutes(), 20 + 30 + 25);

    Ok(())
}

#[test]
fn unavailable_dishes_cannot_be_added() -> TestResult {
    let catalog = demo()?;
    let key = catalog.dish_key("d-lasagne")?;
    let dish = catalog.dish(key).ok_or("dish missing")?;

    let result = Cart::new(catalog.currency()?).add_dish(key, dish);

    assert_eq!(result.err(), Some(CartError::DishUnavailable(key)));

    Ok(())
}
