//! Menu

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

use crate::{areas::Area, restaurants::RestaurantKey};

new_key_type! {
    /// Dish Key
    pub struct DishKey;
}

/// A dish on a restaurant's menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Dish<'a> {
    /// Dish name
    pub name: String,

    /// Short description
    pub description: String,

    /// Restaurant serving the dish
    pub restaurant: RestaurantKey,

    /// Area of the serving restaurant
    pub area: Area,

    /// Price of a single portion
    pub price: Money<'a, Currency>,

    /// Kitchen preparation time for one portion, in minutes
    pub prep_minutes: u32,

    /// Whether the dish can currently be ordered
    pub available: bool,
}
