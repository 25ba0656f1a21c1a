//! Cart Lines

use rusty_money::{Money, iso::Currency};

use crate::{
    areas::Area,
    menu::{Dish, DishKey},
    restaurants::RestaurantKey,
};

/// One dish and its quantity in a customer's cart.
///
/// The restaurant, area, price and prep time are copied from the dish when the
/// line is created, so estimating never needs to look the dish up again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CartLine<'a> {
    dish: DishKey,
    restaurant: RestaurantKey,
    area: Area,
    quantity: u32,
    unit_price: Money<'a, Currency>,
    prep_minutes: u32,
}

impl<'a> CartLine<'a> {
    /// Creates a new cart line.
    pub fn new(
        dish: DishKey,
        restaurant: RestaurantKey,
        area: Area,
        quantity: u32,
        unit_price: Money<'a, Currency>,
        prep_minutes: u32,
    ) -> Self {
        Self {
            dish,
            restaurant,
            area,
            quantity,
            unit_price,
            prep_minutes,
        }
    }

    /// Creates a line for the given dish.
    pub fn from_dish(key: DishKey, dish: &Dish<'a>, quantity: u32) -> Self {
        Self::new(
            key,
            dish.restaurant,
            dish.area,
            quantity,
            dish.price,
            dish.prep_minutes,
        )
    }

    /// Returns the dish of the line
    pub fn dish(&self) -> DishKey {
        self.dish
    }

    /// Returns the restaurant the dish comes from
    pub fn restaurant(&self) -> RestaurantKey {
        self.restaurant
    }

    /// Returns the area of the originating restaurant
    pub fn area(&self) -> Area {
        self.area
    }

    /// Returns the number of portions ordered
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the price of a single portion
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the prep time of one portion, in minutes
    pub fn prep_minutes(&self) -> u32 {
        self.prep_minutes
    }

    /// Returns a copy of this line with a different quantity.
    #[must_use]
    pub fn with_quantity(self, quantity: u32) -> Self {
        Self { quantity, ..self }
    }

    /// Lines with no portions are treated as removed.
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }
}
