//! Nomnom
//!
//! Nomnom is a food delivery engine: browse restaurants and menus by area, fill a cart
//! from several restaurants at once, and estimate what the order costs and how long it
//! takes to arrive.

pub mod areas;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod customers;
pub mod estimates;
pub mod menu;
pub mod observability;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod restaurants;
pub mod search;
pub mod summary;

#[cfg(test)]
mod test_support;
