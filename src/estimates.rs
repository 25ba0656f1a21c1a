//! Delivery Estimates
//!
//! Cost and delivery time for a cart that may span several restaurants in
//! several areas.
//!
//! The time model is:
//!
//! - **prep**: every restaurant cooks its lines in parallel and is ready when its
//!   slowest dish is; the courier waits for the slowest restaurant.
//! - **pickup**: one stop per restaurant, cheaper for restaurants in the
//!   customer's own area.
//! - **delivery**: a single final leg, longer if any restaurant is outside the
//!   customer's area.
//!
//! Estimates are pure: the same cart gives the same estimate. Projecting an
//! arrival time takes "now" from the caller.

use jiff::{SignedDuration, Timestamp};
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    areas::Area,
    cart::{Cart, CartLine},
    restaurants::RestaurantKey,
};

/// Pickup and delivery constants used by the estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EstimateCalculator {
    /// Pickup stop at a restaurant in the customer's area, in minutes
    pub same_area_pickup_minutes: u32,

    /// Pickup stop at a restaurant outside the customer's area, in minutes
    pub different_area_pickup_minutes: u32,

    /// Final leg when every restaurant is in the customer's area, in minutes
    pub same_area_delivery_minutes: u32,

    /// Final leg when any restaurant is outside the customer's area, in minutes
    pub different_area_delivery_minutes: u32,
}

impl Default for EstimateCalculator {
    fn default() -> Self {
        Self {
            same_area_pickup_minutes: 5,
            different_area_pickup_minutes: 10,
            same_area_delivery_minutes: 5,
            different_area_delivery_minutes: 10,
        }
    }
}

impl EstimateCalculator {
    /// Estimate cost and delivery time of a cart for a customer in `customer_area`.
    pub fn estimate<'a>(&self, customer_area: Area, cart: &Cart<'a>) -> Estimate<'a> {
        let legs = restaurant_legs(customer_area, cart.iter());

        let prep_minutes = legs.iter().map(|leg| leg.prep_minutes).max().unwrap_or(0);

        let pickup_minutes = legs
            .iter()
            .map(|leg| {
                if leg.same_area {
                    self.same_area_pickup_minutes
                } else {
                    self.different_area_pickup_minutes
                }
            })
            .fold(0, u32::saturating_add);

        let delivery_minutes = if legs.is_empty() {
            0
        } else if legs.iter().any(|leg| !leg.same_area) {
            self.different_area_delivery_minutes
        } else {
            self.same_area_delivery_minutes
        };

        let estimate = Estimate {
            total_cost: cart.subtotal(),
            prep_minutes,
            pickup_minutes,
            delivery_minutes,
            legs,
        };

        debug!(
            %customer_area,
            restaurants = estimate.legs.len(),
            prep_minutes,
            pickup_minutes,
            delivery_minutes,
            total_cost = %estimate.total_cost,
            "estimated cart"
        );

        estimate
    }
}

/// Estimate a cart with the default pickup and delivery constants.
pub fn estimate<'a>(customer_area: Area, cart: &Cart<'a>) -> Estimate<'a> {
    EstimateCalculator::default().estimate(customer_area, cart)
}

/// One restaurant's share of a cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestaurantLeg {
    /// Restaurant the courier stops at
    pub restaurant: RestaurantKey,

    /// Area of the restaurant
    pub area: Area,

    /// Slowest prep time among the restaurant's lines
    pub prep_minutes: u32,

    /// Whether the restaurant is in the customer's area
    pub same_area: bool,
}

/// Cost and time estimate for a cart.
#[derive(Clone, Debug, PartialEq)]
pub struct Estimate<'a> {
    total_cost: Money<'a, Currency>,
    prep_minutes: u32,
    pickup_minutes: u32,
    delivery_minutes: u32,
    legs: SmallVec<[RestaurantLeg; 4]>,
}

impl<'a> Estimate<'a> {
    /// Sum of unit price times quantity over all lines
    pub fn total_cost(&self) -> Money<'a, Currency> {
        self.total_cost
    }

    /// Prep time of the slowest restaurant
    pub fn prep_minutes(&self) -> u32 {
        self.prep_minutes
    }

    /// Courier time spent collecting from restaurants
    pub fn pickup_minutes(&self) -> u32 {
        self.pickup_minutes
    }

    /// Courier time from the last pickup to the customer
    pub fn delivery_minutes(&self) -> u32 {
        self.delivery_minutes
    }

    /// Total estimated minutes until the order arrives.
    pub fn estimated_minutes(&self) -> u32 {
        self.prep_minutes
            .saturating_add(self.pickup_minutes)
            .saturating_add(self.delivery_minutes)
    }

    /// Per-restaurant breakdown, in the order restaurants appear in the cart.
    pub fn legs(&self) -> &[RestaurantLeg] {
        &self.legs
    }

    /// Estimated time until arrival.
    pub fn duration(&self) -> SignedDuration {
        SignedDuration::from_mins(i64::from(self.estimated_minutes()))
    }

    /// Projects the arrival time from `now`.
    ///
    /// # Errors
    ///
    /// Returns a [`jiff::Error`] if the arrival falls outside the supported timestamp range.
    pub fn arrival(&self, now: Timestamp) -> Result<Timestamp, jiff::Error> {
        now.checked_add(self.duration())
    }
}

fn restaurant_legs<'l, 'a: 'l>(
    customer_area: Area,
    lines: impl Iterator<Item = &'l CartLine<'a>>,
) -> SmallVec<[RestaurantLeg; 4]> {
    let mut legs: SmallVec<[RestaurantLeg; 4]> = SmallVec::new();

    for line in lines.filter(|line| !line.is_empty()) {
        match legs
            .iter_mut()
            .find(|leg| leg.restaurant == line.restaurant())
        {
            Some(leg) => leg.prep_minutes = leg.prep_minutes.max(line.prep_minutes()),
            None => legs.push(RestaurantLeg {
                restaurant: line.restaurant(),
                area: line.area(),
                prep_minutes: line.prep_minutes(),
                same_area: line.area() == customer_area,
            }),
        }
    }

    legs
}
