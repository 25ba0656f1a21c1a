//! Order Summary

use std::io;

use jiff::Zoned;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart, catalog::Catalog, estimates::Estimate, menu::DishKey, pricing::line_total,
    restaurants::RestaurantKey,
};

/// Errors that can occur when writing an order summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// A cart line refers to a dish missing from the catalog.
    #[error("Missing dish {0:?}")]
    MissingDish(DishKey),

    /// A cart line refers to a restaurant missing from the catalog.
    #[error("Missing restaurant {0:?}")]
    MissingRestaurant(RestaurantKey),

    /// IO error
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A cart and its estimate, ready to print at checkout.
#[derive(Debug, Clone, Copy)]
pub struct OrderSummary<'s, 'a> {
    cart: &'s Cart<'a>,
    estimate: &'s Estimate<'a>,
}

impl<'s, 'a> OrderSummary<'s, 'a> {
    /// Create a summary for the given cart and estimate.
    pub fn new(cart: &'s Cart<'a>, estimate: &'s Estimate<'a>) -> Self {
        Self { cart, estimate }
    }

    /// Writes the summary table followed by totals and timings.
    ///
    /// Lines are grouped by restaurant in the order the restaurants appear in the
    /// estimate.
    ///
    /// # Errors
    ///
    /// Returns an error if a dish or restaurant is missing from the catalog, or
    /// the output cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        catalog: &Catalog<'_>,
        arrival: Option<&Zoned>,
    ) -> Result<(), SummaryError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Restaurant", "Dish", "Qty", "Unit Price", "Line Total"]);

        let mut group_rows: SmallVec<[usize; 8]> = SmallVec::new();
        let mut row = 1;

        for leg in self.estimate.legs() {
            let restaurant = catalog
                .restaurant(leg.restaurant)
                .ok_or(SummaryError::MissingRestaurant(leg.restaurant))?;

            group_rows.push(row);

            let lines = self
                .cart
                .iter()
                .filter(|line| line.restaurant() == leg.restaurant && !line.is_empty());

            for (idx, line) in lines.enumerate() {
                let dish = catalog
                    .dish(line.dish())
                    .ok_or(SummaryError::MissingDish(line.dish()))?;

                let restaurant_cell = if idx == 0 {
                    format!("{} ({})", restaurant.name, restaurant.area)
                } else {
                    String::new()
                };

                builder.push_record([
                    format!("#{row:<3}"),
                    restaurant_cell,
                    dish.name.clone(),
                    line.quantity().to_string(),
                    format!("{}", line.unit_price()),
                    format!("{}", line_total(line)),
                ]);

                row += 1;
            }
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        for &group_row in &group_rows {
            if group_row > 1 {
                theme.insert_horizontal_line(group_row, separator);
            }
        }

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "\n{table}")?;

        self.write_totals(&mut out, arrival)
    }

    fn write_totals(
        &self,
        out: &mut impl io::Write,
        arrival: Option<&Zoned>,
    ) -> Result<(), SummaryError> {
        let mut rows: SmallVec<[(&str, String); 6]> = SmallVec::new();

        rows.push(("Total:", format!("{}", self.estimate.total_cost())));
        rows.push(("Prep:", format!("{} min", self.estimate.prep_minutes())));
        rows.push(("Pickup:", format!("{} min", self.estimate.pickup_minutes())));
        rows.push(("Delivery:", format!("{} min", self.estimate.delivery_minutes())));
        rows.push((
            "Estimated:",
            format!("{} min", self.estimate.estimated_minutes()),
        ));

        if let Some(arrival) = arrival {
            rows.push(("Arrival:", format_arrival(arrival)));
        }

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &rows {
            writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
        }

        writeln!(out)?;

        Ok(())
    }
}

/// Formats an arrival time as a 12-hour clock reading, e.g. `07:45 PM`.
pub fn format_arrival(arrival: &Zoned) -> String {
    arrival.strftime("%I:%M %p").to_string()
}
