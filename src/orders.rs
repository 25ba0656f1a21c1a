//! Orders

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{
    areas::Area,
    cart::{Cart, CartLine},
    customers::{Customer, CustomerKey},
    estimates::Estimate,
};

/// Errors that can occur while placing or progressing orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The cart had no lines.
    #[error("an order needs at least one dish")]
    EmptyOrder,

    /// The order has already reached its final status.
    #[error("order {0} has already been delivered")]
    AlreadyDelivered(Uuid),

    /// No order exists with the given id.
    #[error("order {0} not found")]
    NotFound(Uuid),

    /// The estimated arrival could not be projected.
    #[error(transparent)]
    Time(#[from] jiff::Error),
}

/// Delivery status of an order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Submitted, not yet picked up by a kitchen
    #[default]
    Pending,

    /// Being cooked
    Preparing,

    /// With the courier
    Delivering,

    /// Handed to the customer
    Delivered,
}

impl OrderStatus {
    /// Next status in the delivery lifecycle, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Delivering),
            OrderStatus::Delivering => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Delivered => "delivered",
        })
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order<'a> {
    /// Order id
    pub id: Uuid,

    /// Customer who placed the order
    pub customer: CustomerKey,

    /// Customer's delivery area at the time of ordering
    pub area: Area,

    /// Dishes ordered
    pub lines: Vec<CartLine<'a>>,

    /// Estimated minutes from placement to arrival
    pub estimated_minutes: u32,

    /// Projected arrival
    pub estimated_arrival: Timestamp,

    /// Delivery status
    pub status: OrderStatus,

    /// Total cost of the order
    pub total_cost: Money<'a, Currency>,

    /// Time the order was placed
    pub created_at: Timestamp,
}

impl<'a> Order<'a> {
    /// Turn a cart and its estimate into a pending order placed at `now`.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptyOrder`]: the cart has no lines.
    /// - [`OrderError::Time`]: the arrival could not be projected.
    pub fn place(
        customer_key: CustomerKey,
        customer: &Customer,
        cart: Cart<'a>,
        estimate: &Estimate<'a>,
        now: Timestamp,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        Ok(Order {
            id: Uuid::now_v7(),
            customer: customer_key,
            area: customer.area,
            lines: cart.into_lines(),
            estimated_minutes: estimate.estimated_minutes(),
            estimated_arrival: estimate.arrival(now)?,
            status: OrderStatus::Pending,
            total_cost: estimate.total_cost(),
            created_at: now,
        })
    }

    /// Move the order one status forward.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::AlreadyDelivered`] if the order is already delivered.
    pub fn advance(&mut self) -> Result<OrderStatus, OrderError> {
        let next = self
            .status
            .next()
            .ok_or(OrderError::AlreadyDelivered(self.id))?;

        self.status = next;

        Ok(next)
    }

    /// True once the estimated delivery time has passed.
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.created_at
            .checked_add(SignedDuration::from_mins(i64::from(self.estimated_minutes)))
            .is_ok_and(|due| due <= now)
    }
}

/// In-memory store of placed orders.
#[derive(Debug, Default)]
pub struct OrderBook<'a> {
    orders: Vec<Order<'a>>,
}

impl<'a> OrderBook<'a> {
    /// Create an empty order book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an order and return its id.
    pub fn submit(&mut self, order: Order<'a>) -> Uuid {
        let id = order.id;

        info!(
            order_id = %id,
            area = %order.area,
            estimated_minutes = order.estimated_minutes,
            total_cost = %order.total_cost,
            "order submitted"
        );

        self.orders.push(order);

        id
    }

    /// Look up an order by id.
    pub fn get(&self, id: Uuid) -> Option<&Order<'a>> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Move an order one status forward.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the order is unknown or already delivered.
    pub fn advance(&mut self, id: Uuid) -> Result<OrderStatus, OrderError> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(OrderError::NotFound(id))?;

        let status = order.advance()?;

        info!(order_id = %id, %status, "order advanced");

        Ok(status)
    }

    /// Orders placed by a customer, newest first.
    pub fn for_customer(&self, customer: CustomerKey) -> Vec<&Order<'a>> {
        let mut orders: Vec<_> = self
            .orders
            .iter()
            .filter(|order| order.customer == customer)
            .collect();

        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        orders
    }

    /// Mark every pending order whose estimate has elapsed as delivered.
    ///
    /// Returns the number of orders updated.
    pub fn mark_due_delivered(&mut self, now: Timestamp) -> usize {
        let mut updated = 0;

        for order in &mut self.orders {
            if order.status == OrderStatus::Pending && order.is_due(now) {
                order.status = OrderStatus::Delivered;
                updated += 1;
            }
        }

        info!(updated, "delivered sweep finished");

        updated
    }

    /// Iterate over all orders in submission order.
    pub fn iter(&self) -> impl Iterator<Item = &Order<'a>> {
        self.orders.iter()
    }

    /// Number of stored orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the book holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
