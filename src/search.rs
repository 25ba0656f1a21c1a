//! Search

use crate::{
    areas::AreaFilter,
    menu::{Dish, DishKey},
    restaurants::{Restaurant, RestaurantKey},
};

/// Restaurants whose name or description contains `term` and whose area passes `area`.
///
/// Matching ignores case. An empty term matches every restaurant.
pub fn filter_restaurants<'r>(
    restaurants: impl IntoIterator<Item = (RestaurantKey, &'r Restaurant)>,
    term: &str,
    area: AreaFilter,
) -> impl Iterator<Item = (RestaurantKey, &'r Restaurant)> {
    let needle = term.trim().to_lowercase();

    restaurants.into_iter().filter(move |(_, restaurant)| {
        area.matches(restaurant.area)
            && matches_term(&needle, &restaurant.name, &restaurant.description)
    })
}

/// Dishes whose name or description contains `term`.
///
/// Unavailable dishes are skipped unless `show_unavailable` is set.
pub fn filter_dishes<'d, 'a: 'd>(
    dishes: impl IntoIterator<Item = (DishKey, &'d Dish<'a>)>,
    term: &str,
    show_unavailable: bool,
) -> impl Iterator<Item = (DishKey, &'d Dish<'a>)> {
    let needle = term.trim().to_lowercase();

    dishes.into_iter().filter(move |(_, dish)| {
        (show_unavailable || dish.available)
            && matches_term(&needle, &dish.name, &dish.description)
    })
}

fn matches_term(needle: &str, name: &str, description: &str) -> bool {
    needle.is_empty()
        || name.to_lowercase().contains(needle)
        || description.to_lowercase().contains(needle)
}
