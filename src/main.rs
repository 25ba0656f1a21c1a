//! Nomnom CLI

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};
use jiff::{Timestamp, tz::TimeZone};
use nomnom::{
    config::{CatalogConfig, DeliveryPolicyConfig, DishArg, LoggingConfig},
    observability::init_subscriber,
    prelude::*,
};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "nomnom", about = "Nomnom food delivery CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    catalog: CatalogConfig,

    #[command(flatten)]
    policy: DeliveryPolicyConfig,

    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List restaurants
    Restaurants(RestaurantsArgs),

    /// Show a restaurant's menu
    Menu(MenuArgs),

    /// Estimate cost and delivery time for a cart
    Estimate(CheckoutArgs),

    /// Estimate a cart and place it as an order
    Order(CheckoutArgs),
}

#[derive(Debug, Args)]
struct RestaurantsArgs {
    /// Only show restaurants whose name or description contains this term
    #[arg(long, default_value = "")]
    search: String,

    /// Area to list: All, North, East or West
    #[arg(long, default_value = "All")]
    area: AreaFilter,
}

#[derive(Debug, Args)]
struct MenuArgs {
    /// Restaurant id from the fixture set
    restaurant: String,

    /// Only show dishes whose name or description contains this term
    #[arg(long, default_value = "")]
    search: String,

    /// Include dishes that are currently unavailable
    #[arg(long)]
    show_unavailable: bool,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    /// Customer id from the fixture set
    #[arg(long)]
    customer: String,

    /// Dish to add, as DISH_ID or DISH_ID:QTY; repeatable
    #[arg(long = "dish", required = true)]
    dishes: Vec<DishArg>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_subscriber(&cli.logging) {
        eprintln!("failed to initialise logging: {error}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let catalog = Catalog::from_set_in(&cli.catalog.fixtures, &cli.catalog.fixture_set)
        .map_err(|error| format!("failed to load fixture set: {error}"))?;

    debug!(
        restaurants = catalog.restaurants().len(),
        dishes = catalog.dishes().len(),
        customers = catalog.customers().len(),
        "catalog loaded"
    );

    let calculator = EstimateCalculator::from(&cli.policy);

    match cli.command {
        Commands::Restaurants(args) => list_restaurants(&catalog, &args),
        Commands::Menu(args) => show_menu(&catalog, &args),
        Commands::Estimate(args) => checkout(&catalog, &calculator, &args, false),
        Commands::Order(args) => checkout(&catalog, &calculator, &args, true),
    }
}

fn list_restaurants(catalog: &Catalog<'_>, args: &RestaurantsArgs) -> Result<(), String> {
    let mut found: Vec<_> =
        filter_restaurants(catalog.restaurants().iter(), &args.search, args.area).collect();

    found.sort_by(|(_, a), (_, b)| a.name.cmp(&b.name));

    let mut out = io::stdout().lock();

    if found.is_empty() {
        writeln!(out, "No restaurants found").map_err(|error| error.to_string())?;
        return Ok(());
    }

    for (_, restaurant) in found {
        writeln!(
            out,
            "{:<24} {:<6} {}",
            restaurant.name, restaurant.area, restaurant.description
        )
        .map_err(|error| error.to_string())?;
    }

    Ok(())
}

fn show_menu(catalog: &Catalog<'_>, args: &MenuArgs) -> Result<(), String> {
    let key = catalog
        .restaurant_key(&args.restaurant)
        .map_err(|error| error.to_string())?;

    let mut dishes: Vec<_> =
        filter_dishes(catalog.menu_of(key), &args.search, args.show_unavailable).collect();

    dishes.sort_by(|(_, a), (_, b)| a.name.cmp(&b.name));

    let mut out = io::stdout().lock();

    for (_, dish) in dishes {
        let status = if dish.available { "" } else { " (unavailable)" };

        writeln!(
            out,
            "{:<28} {:>10} {:>4} min{status}",
            dish.name,
            dish.price.to_string(),
            dish.prep_minutes
        )
        .map_err(|error| error.to_string())?;
    }

    Ok(())
}

fn checkout(
    catalog: &Catalog<'static>,
    calculator: &EstimateCalculator,
    args: &CheckoutArgs,
    place: bool,
) -> Result<(), String> {
    let customer_key = catalog
        .customer_key(&args.customer)
        .map_err(|error| error.to_string())?;

    let customer = catalog
        .customer(customer_key)
        .ok_or_else(|| format!("customer not found: {}", args.customer))?;

    let currency = catalog.currency().map_err(|error| error.to_string())?;
    let mut cart = Cart::new(currency);

    for arg in &args.dishes {
        let key = catalog.dish_key(&arg.id).map_err(|error| error.to_string())?;

        let dish = catalog
            .dish(key)
            .ok_or_else(|| format!("dish not found: {}", arg.id))?;

        let existing = cart.line(key).map_or(0, CartLine::quantity);

        cart = cart
            .add_dish(key, dish)
            .and_then(|cart| cart.with_quantity(key, existing.saturating_add(arg.quantity)))
            .map_err(|error| format!("{}: {error}", arg.id))?;
    }

    let estimate = calculator.estimate(customer.area, &cart);
    let now = Timestamp::now();

    let arrival = estimate
        .arrival(now)
        .map_err(|error| format!("failed to project arrival: {error}"))?
        .to_zoned(TimeZone::system());

    let mut out = io::stdout().lock();

    OrderSummary::new(&cart, &estimate)
        .write_to(&mut out, catalog, Some(&arrival))
        .map_err(|error| error.to_string())?;

    if place {
        let mut book = OrderBook::new();
        let order = Order::place(customer_key, customer, cart, &estimate, now)
            .map_err(|error| error.to_string())?;
        let id = book.submit(order);

        let status = book
            .get(id)
            .map(|order| order.status)
            .unwrap_or_default();

        writeln!(
            out,
            "Order {id} for {} is {status}",
            customer.full_name()
        )
        .map_err(|error| error.to_string())?;
    }

    Ok(())
}
