//! Cart

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    menu::{Dish, DishKey},
    pricing::total_cost,
    restaurants::RestaurantKey,
};

pub mod lines;

pub use lines::CartLine;

/// Errors related to cart construction or edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A line's currency differs from the cart currency (index, line currency, cart currency).
    #[error("Line {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// The dish is switched off on the restaurant's menu.
    #[error("Dish {0:?} is not available")]
    DishUnavailable(DishKey),

    /// The dish has no line in the cart.
    #[error("Dish {0:?} is not in the cart")]
    LineNotFound(DishKey),
}

/// A customer's order in progress.
///
/// Carts are values: every edit consumes the cart and hands back the new one.
/// A cart holds at most one line per dish and never holds a line with zero
/// quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create a cart from the given lines.
    ///
    /// Lines for the same dish are merged and empty lines are dropped.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::CurrencyMismatch` if any line is priced in another currency.
    pub fn with_lines(
        lines: impl Into<Vec<CartLine<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let mut cart = Cart::new(currency);

        for (idx, line) in lines.into().into_iter().enumerate() {
            cart.check_currency(idx, &line)?;
            cart.merge(line);
        }

        Ok(cart)
    }

    /// Add one portion of a dish.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if the dish is unavailable or priced in another currency.
    pub fn add_dish(mut self, key: DishKey, dish: &Dish<'a>) -> Result<Self, CartError> {
        if !dish.available {
            return Err(CartError::DishUnavailable(key));
        }

        let line = CartLine::from_dish(key, dish, 1);

        self.check_currency(self.lines.len(), &line)?;
        self.merge(line);

        Ok(self)
    }

    /// Set the quantity of a dish already in the cart. A quantity of zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::LineNotFound` if the dish has no line in the cart.
    pub fn with_quantity(mut self, dish: DishKey, quantity: u32) -> Result<Self, CartError> {
        let idx = self
            .lines
            .iter()
            .position(|line| line.dish() == dish)
            .ok_or(CartError::LineNotFound(dish))?;

        if quantity == 0 {
            self.lines.remove(idx);
        } else if let Some(line) = self.lines.get_mut(idx) {
            *line = line.with_quantity(quantity);
        }

        Ok(self)
    }

    /// Remove a dish from the cart, if present.
    #[must_use]
    pub fn remove(mut self, dish: DishKey) -> Self {
        self.lines.retain(|line| line.dish() != dish);
        self
    }

    /// Calculate the total cost of the cart.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        total_cost(&self.lines, self.currency)
    }

    /// Get the line for a dish.
    pub fn line(&self, dish: DishKey) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.dish() == dish)
    }

    /// Get all lines, in the order they were added.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Consume the cart, returning its lines.
    pub fn into_lines(self) -> Vec<CartLine<'a>> {
        self.lines
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Distinct restaurants in the cart, in order of first appearance.
    pub fn restaurants(&self) -> SmallVec<[RestaurantKey; 4]> {
        let mut restaurants = SmallVec::new();

        for line in &self.lines {
            if !restaurants.contains(&line.restaurant()) {
                restaurants.push(line.restaurant());
            }
        }

        restaurants
    }

    /// Total number of portions across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .map(CartLine::quantity)
            .fold(0, u32::saturating_add)
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn check_currency(&self, idx: usize, line: &CartLine<'a>) -> Result<(), CartError> {
        let line_currency = line.unit_price().currency();

        if line_currency == self.currency {
            Ok(())
        } else {
            Err(CartError::CurrencyMismatch(
                idx,
                line_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ))
        }
    }

    fn merge(&mut self, line: CartLine<'a>) {
        if line.is_empty() {
            return;
        }

        match self.lines.iter_mut().find(|existing| existing.dish() == line.dish()) {
            Some(existing) => {
                *existing = existing.with_quantity(existing.quantity().saturating_add(line.quantity()));
            }
            None => self.lines.push(line),
        }
    }
}
