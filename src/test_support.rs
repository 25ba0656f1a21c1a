//! Shared test helpers.

use rusty_money::{Money, iso::EUR};
use slotmap::SlotMap;

use crate::{
    areas::Area,
    menu::{Dish, DishKey},
    restaurants::{Restaurant, RestaurantKey},
};

/// Builds restaurants and EUR-priced dishes with real slot map keys.
pub(crate) struct Kitchen {
    restaurants: SlotMap<RestaurantKey, Restaurant>,
    dishes: SlotMap<DishKey, ()>,
}

impl Kitchen {
    pub(crate) fn new() -> Self {
        Self {
            restaurants: SlotMap::with_key(),
            dishes: SlotMap::with_key(),
        }
    }

    pub(crate) fn restaurant(&mut self, name: &str, area: Area) -> RestaurantKey {
        self.restaurants.insert(Restaurant {
            name: name.to_string(),
            description: String::new(),
            address: String::new(),
            phone: String::new(),
            area,
            image: String::new(),
        })
    }

    pub(crate) fn dish(
        &mut self,
        restaurant: RestaurantKey,
        price_minor: i64,
        prep_minutes: u32,
    ) -> (DishKey, Dish<'static>) {
        let area = self
            .restaurants
            .get(restaurant)
            .map_or(Area::North, |restaurant| restaurant.area);

        let key = self.dishes.insert(());

        let dish = Dish {
            name: format!("Dish {}", self.dishes.len()),
            description: String::new(),
            restaurant,
            area,
            price: Money::from_minor(price_minor, EUR),
            prep_minutes,
            available: true,
        };

        (key, dish)
    }
}
