//! Restaurants

use slotmap::new_key_type;

use crate::areas::Area;

new_key_type! {
    /// Restaurant Key
    pub struct RestaurantKey;
}

/// Restaurant
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    /// Restaurant name
    pub name: String,

    /// Short description shown when browsing
    pub description: String,

    /// Street address
    pub address: String,

    /// Contact phone number
    pub phone: String,

    /// Delivery zone the restaurant operates from
    pub area: Area,

    /// Image URL
    pub image: String,
}
