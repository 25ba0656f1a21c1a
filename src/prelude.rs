//! Nomnom prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    areas::{Area, AreaError, AreaFilter},
    cart::{Cart, CartError, CartLine},
    catalog::{Catalog, CatalogError},
    customers::{Customer, CustomerKey},
    estimates::{Estimate, EstimateCalculator, RestaurantLeg, estimate},
    menu::{Dish, DishKey},
    orders::{Order, OrderBook, OrderError, OrderStatus},
    pricing::{line_total, total_cost},
    restaurants::{Restaurant, RestaurantKey},
    search::{filter_dishes, filter_restaurants},
    summary::{OrderSummary, SummaryError},
};
