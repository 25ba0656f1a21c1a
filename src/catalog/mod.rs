//! Catalog
//!
//! Restaurants, menus and customers loaded from YAML fixture sets, keyed by
//! slot map keys with lookups by the string ids used in the fixture files.
//!
//! A fixture set `name` under a base directory is made of three files:
//!
//! ```text
//! <base>/restaurants/<name>.yml
//! <base>/menu/<name>.yml
//! <base>/customers/<name>.yml
//! ```

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::CartLine,
    customers::{Customer, CustomerKey},
    menu::{Dish, DishKey},
    restaurants::{Restaurant, RestaurantKey},
};

pub mod fixtures;

use fixtures::{
    CustomersFixture, MenuFixture, RestaurantsFixture, currency_from_code, parse_price,
    sorted_by_id,
};

/// Catalog Errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between dishes
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No dishes loaded yet
    #[error("No dishes loaded yet; currency unknown")]
    NoCurrency,

    /// Restaurant not found
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    /// Dish not found
    #[error("Dish not found: {0}")]
    DishNotFound(String),

    /// Customer not found
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),
}

/// Catalog
#[derive(Debug)]
pub struct Catalog<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    restaurants: SlotMap<RestaurantKey, Restaurant>,
    dishes: SlotMap<DishKey, Dish<'a>>,
    customers: SlotMap<CustomerKey, Customer>,

    /// Fixture id -> `SlotMap` key mappings for lookups
    restaurant_keys: FxHashMap<String, RestaurantKey>,
    dish_keys: FxHashMap<String, DishKey>,
    customer_keys: FxHashMap<String, CustomerKey>,

    /// Currency shared by every dish
    currency: Option<&'static Currency>,
}

impl Default for Catalog<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Catalog<'a> {
    /// Create a new empty catalog with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty catalog with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            restaurants: SlotMap::with_key(),
            dishes: SlotMap::with_key(),
            customers: SlotMap::with_key(),
            restaurant_keys: FxHashMap::default(),
            dish_keys: FxHashMap::default(),
            customer_keys: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load a complete fixture set from `./fixtures`
    ///
    /// # Errors
    ///
    /// Returns an error if any of the set's files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, CatalogError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the set's files cannot be loaded.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self::with_base_path(base_path);

        catalog
            .load_restaurants(name)?
            .load_menu(name)?
            .load_customers(name)?;

        debug!(
            set = name,
            restaurants = catalog.restaurants.len(),
            dishes = catalog.dishes.len(),
            customers = catalog.customers.len(),
            "loaded catalog"
        );

        Ok(catalog)
    }

    /// Load restaurants from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_restaurants(&mut self, name: &str) -> Result<&mut Self, CatalogError> {
        let contents = self.read_fixture("restaurants", name)?;
        let fixture: RestaurantsFixture = serde_norway::from_str(&contents)?;

        for (id, restaurant) in sorted_by_id(fixture.restaurants) {
            self.insert_restaurant(
                id,
                Restaurant {
                    name: restaurant.name,
                    description: restaurant.description,
                    address: restaurant.address,
                    phone: restaurant.phone,
                    area: restaurant.area,
                    image: restaurant.image,
                },
            );
        }

        Ok(self)
    }

    /// Load dishes from a YAML fixture file
    ///
    /// Restaurants must be loaded first; each dish takes its area from its restaurant.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a price is invalid,
    /// currencies differ, or a referenced restaurant doesn't exist.
    pub fn load_menu(&mut self, name: &str) -> Result<&mut Self, CatalogError> {
        let contents = self.read_fixture("menu", name)?;
        let fixture: MenuFixture = serde_norway::from_str(&contents)?;

        for (id, dish) in sorted_by_id(fixture.dishes) {
            let restaurant = self.restaurant_key(&dish.restaurant)?;
            let area = self
                .restaurants
                .get(restaurant)
                .map(|restaurant| restaurant.area)
                .ok_or_else(|| CatalogError::RestaurantNotFound(dish.restaurant.clone()))?;
            let (minor_units, currency) = parse_price(&dish.price)?;

            if minor_units == 0 {
                warn!(dish = %id, "dish has a zero price");
            }

            self.insert_dish(
                id,
                Dish {
                    name: dish.name,
                    description: dish.description,
                    restaurant,
                    area,
                    price: Money::from_minor(minor_units, currency),
                    prep_minutes: dish.prep_time,
                    available: dish.available,
                },
            )?;
        }

        Ok(self)
    }

    /// Load customers from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_customers(&mut self, name: &str) -> Result<&mut Self, CatalogError> {
        let contents = self.read_fixture("customers", name)?;
        let fixture: CustomersFixture = serde_norway::from_str(&contents)?;

        for (id, customer) in sorted_by_id(fixture.customers) {
            self.insert_customer(
                id,
                Customer {
                    name: customer.name,
                    last_name: customer.last_name,
                    address: customer.address,
                    phone: customer.phone,
                    area: customer.area,
                },
            );
        }

        Ok(self)
    }

    /// Add a restaurant under the given id, replacing any restaurant with the same id.
    pub fn insert_restaurant(
        &mut self,
        id: impl Into<String>,
        restaurant: Restaurant,
    ) -> RestaurantKey {
        let id = id.into();

        if let Some(&existing) = self.restaurant_keys.get(&id) {
            self.replace_restaurant(existing, restaurant);

            return existing;
        }

        let key = self.restaurants.insert(restaurant);
        self.restaurant_keys.insert(id, key);

        key
    }

    /// Replace a restaurant's details. Dishes follow the restaurant if its area changes.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RestaurantNotFound`] if the key is unknown.
    pub fn update_restaurant(
        &mut self,
        key: RestaurantKey,
        restaurant: Restaurant,
    ) -> Result<(), CatalogError> {
        if self.replace_restaurant(key, restaurant) {
            Ok(())
        } else {
            Err(CatalogError::RestaurantNotFound(format!("{key:?}")))
        }
    }

    /// Swap in new restaurant details and move its dishes to the restaurant's area.
    ///
    /// Returns false if the key is unknown.
    fn replace_restaurant(&mut self, key: RestaurantKey, restaurant: Restaurant) -> bool {
        let area = restaurant.area;

        let Some(slot) = self.restaurants.get_mut(key) else {
            return false;
        };

        *slot = restaurant;

        for dish in self.dishes.values_mut().filter(|dish| dish.restaurant == key) {
            dish.area = area;
        }

        true
    }

    /// Add a dish under the given id. The dish's area is set from its restaurant.
    ///
    /// # Errors
    ///
    /// Returns an error if the restaurant is unknown or the dish is priced in a
    /// different currency from the rest of the catalog.
    pub fn insert_dish(
        &mut self,
        id: impl Into<String>,
        mut dish: Dish<'a>,
    ) -> Result<DishKey, CatalogError> {
        let id = id.into();

        let restaurant = self
            .restaurants
            .get(dish.restaurant)
            .ok_or_else(|| CatalogError::RestaurantNotFound(format!("{:?}", dish.restaurant)))?;

        dish.area = restaurant.area;

        let currency = currency_from_code(dish.price.currency().iso_alpha_code)?;

        match self.currency {
            Some(existing) if existing != currency => {
                return Err(CatalogError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
            Some(_) => {}
            None => self.currency = Some(currency),
        }

        if let Some(existing) = self.dish_keys.remove(&id) {
            self.dishes.remove(existing);
        }

        let key = self.dishes.insert(dish);
        self.dish_keys.insert(id, key);

        Ok(key)
    }

    /// Remove a dish from the menu.
    pub fn remove_dish(&mut self, key: DishKey) -> Option<Dish<'a>> {
        self.dish_keys.retain(|_, existing| *existing != key);
        self.dishes.remove(key)
    }

    /// Switch a dish on or off.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DishNotFound`] if the key is unknown.
    pub fn set_dish_availability(
        &mut self,
        key: DishKey,
        available: bool,
    ) -> Result<(), CatalogError> {
        let dish = self
            .dishes
            .get_mut(key)
            .ok_or_else(|| CatalogError::DishNotFound(format!("{key:?}")))?;

        dish.available = available;

        Ok(())
    }

    /// Add a customer under the given id, replacing any customer with the same id.
    pub fn insert_customer(&mut self, id: impl Into<String>, customer: Customer) -> CustomerKey {
        let id = id.into();

        if let Some(&existing) = self.customer_keys.get(&id) {
            if let Some(slot) = self.customers.get_mut(existing) {
                *slot = customer;
            }

            return existing;
        }

        let key = self.customers.insert(customer);
        self.customer_keys.insert(id, key);

        key
    }

    /// Build a cart line for a dish.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DishNotFound`] if the key is unknown.
    pub fn cart_line(&self, key: DishKey, quantity: u32) -> Result<CartLine<'a>, CatalogError> {
        let dish = self
            .dishes
            .get(key)
            .ok_or_else(|| CatalogError::DishNotFound(format!("{key:?}")))?;

        Ok(CartLine::from_dish(key, dish, quantity))
    }

    /// Look up a restaurant key by fixture id
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RestaurantNotFound`] if the id is unknown.
    pub fn restaurant_key(&self, id: &str) -> Result<RestaurantKey, CatalogError> {
        self.restaurant_keys
            .get(id)
            .copied()
            .ok_or_else(|| CatalogError::RestaurantNotFound(id.to_string()))
    }

    /// Look up a dish key by fixture id
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DishNotFound`] if the id is unknown.
    pub fn dish_key(&self, id: &str) -> Result<DishKey, CatalogError> {
        self.dish_keys
            .get(id)
            .copied()
            .ok_or_else(|| CatalogError::DishNotFound(id.to_string()))
    }

    /// Look up a customer key by fixture id
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CustomerNotFound`] if the id is unknown.
    pub fn customer_key(&self, id: &str) -> Result<CustomerKey, CatalogError> {
        self.customer_keys
            .get(id)
            .copied()
            .ok_or_else(|| CatalogError::CustomerNotFound(id.to_string()))
    }

    /// Get a restaurant
    pub fn restaurant(&self, key: RestaurantKey) -> Option<&Restaurant> {
        self.restaurants.get(key)
    }

    /// Get a dish
    pub fn dish(&self, key: DishKey) -> Option<&Dish<'a>> {
        self.dishes.get(key)
    }

    /// Get a customer
    pub fn customer(&self, key: CustomerKey) -> Option<&Customer> {
        self.customers.get(key)
    }

    /// All restaurants
    pub fn restaurants(&self) -> &SlotMap<RestaurantKey, Restaurant> {
        &self.restaurants
    }

    /// All dishes
    pub fn dishes(&self) -> &SlotMap<DishKey, Dish<'a>> {
        &self.dishes
    }

    /// All customers
    pub fn customers(&self) -> &SlotMap<CustomerKey, Customer> {
        &self.customers
    }

    /// Dishes served by a restaurant
    pub fn menu_of(&self, restaurant: RestaurantKey) -> impl Iterator<Item = (DishKey, &Dish<'a>)> {
        self.dishes
            .iter()
            .filter(move |(_, dish)| dish.restaurant == restaurant)
    }

    /// Currency shared by every dish
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoCurrency`] if no dishes have been loaded.
    pub fn currency(&self) -> Result<&'static Currency, CatalogError> {
        self.currency.ok_or(CatalogError::NoCurrency)
    }

    fn read_fixture(&self, kind: &str, name: &str) -> Result<String, CatalogError> {
        let file_path = self.base_path.join(kind).join(format!("{name}.yml"));

        Ok(fs::read_to_string(file_path)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rusty_money::iso::{EUR, GBP};
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::{areas::Area, cart::Cart, estimates::estimate};

    use super::*;

    const RESTAURANTS: &str = r#"
restaurants:
  r-pasta:
    name: Pasta Palace
    description: Fresh pasta daily
    area: North
  r-sushi:
    name: Sushi Stop
    area: East
"#;

    const MENU: &str = r#"
dishes:
  d-carbonara:
    restaurant: r-pasta
    name: Carbonara
    price: "11.50 EUR"
    prep_time: 15
  d-maki:
    restaurant: r-sushi
    name: Salmon Maki
    price: "8.00 EUR"
    prep_time: 20
    available: false
"#;

    const CUSTOMERS: &str = r#"
customers:
  c-ada:
    name: Ada
    last_name: Lovelace
    address: 1 Analytical Way
    area: North
"#;

    fn write_set(dir: &TempDir, name: &str, menu: &str) -> TestResult {
        for (kind, contents) in [
            ("restaurants", RESTAURANTS),
            ("menu", menu),
            ("customers", CUSTOMERS),
        ] {
            let kind_dir = dir.path().join(kind);
            fs::create_dir_all(&kind_dir)?;
            fs::write(kind_dir.join(format!("{name}.yml")), contents)?;
        }

        Ok(())
    }

    #[test]
    fn from_set_loads_everything() -> TestResult {
        let dir = TempDir::new()?;
        write_set(&dir, "test", MENU)?;

        let catalog = Catalog::from_set_in(dir.path(), "test")?;

        assert_eq!(catalog.restaurants().len(), 2);
        assert_eq!(catalog.dishes().len(), 2);
        assert_eq!(catalog.customers().len(), 1);
        assert_eq!(catalog.currency()?, EUR);

        let maki = catalog.dish_key("d-maki")?;
        let maki_dish = catalog.dish(maki).ok_or("missing maki")?;

        assert_eq!(maki_dish.area, Area::East);
        assert_eq!(maki_dish.prep_minutes, 20);
        assert!(!maki_dish.available);

        let ada = catalog.customer_key("c-ada")?;
        assert_eq!(catalog.customer(ada).map(|c| c.area), Some(Area::North));

        Ok(())
    }

    #[test]
    fn menu_with_unknown_restaurant_errors() -> TestResult {
        let dir = TempDir::new()?;
        write_set(
            &dir,
            "broken",
            "dishes:\n  d-x:\n    restaurant: r-nowhere\n    name: X\n    price: \"1.00 EUR\"\n",
        )?;

        let result = Catalog::from_set_in(dir.path(), "broken");

        assert!(matches!(result, Err(CatalogError::RestaurantNotFound(id)) if id == "r-nowhere"));

        Ok(())
    }

    #[test]
    fn menu_with_mixed_currencies_errors() -> TestResult {
        let dir = TempDir::new()?;
        write_set(
            &dir,
            "mixed",
            "dishes:\n  d-a:\n    restaurant: r-pasta\n    name: A\n    price: \"1.00 EUR\"\n  d-b:\n    restaurant: r-pasta\n    name: B\n    price: \"1.00 GBP\"\n",
        )?;

        let result = Catalog::from_set_in(dir.path(), "mixed");

        assert!(matches!(result, Err(CatalogError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn missing_fixture_file_is_io_error() {
        let result = Catalog::from_set_in("/definitely/not/here", "nothing");

        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn unknown_ids_error() {
        let catalog = Catalog::new();

        assert!(matches!(catalog.dish_key("d-none"), Err(CatalogError::DishNotFound(_))));
        assert!(matches!(
            catalog.customer_key("c-none"),
            Err(CatalogError::CustomerNotFound(_))
        ));
        assert!(matches!(catalog.currency(), Err(CatalogError::NoCurrency)));
    }

    fn restaurant(name: &str, area: Area) -> Restaurant {
        Restaurant {
            name: name.to_string(),
            description: String::new(),
            address: String::new(),
            phone: String::new(),
            area,
            image: String::new(),
        }
    }

    fn dish<'a>(restaurant: RestaurantKey, price: Money<'a, Currency>) -> Dish<'a> {
        Dish {
            name: "Special".to_string(),
            description: String::new(),
            restaurant,
            area: Area::West,
            price,
            prep_minutes: 10,
            available: true,
        }
    }

    #[test]
    fn insert_dish_takes_area_from_restaurant() -> TestResult {
        let mut catalog = Catalog::new();
        let diner = catalog.insert_restaurant("r-diner", restaurant("Diner", Area::North));

        let key = catalog.insert_dish("d-special", dish(diner, Money::from_minor(700, EUR)))?;

        assert_eq!(catalog.dish(key).map(|d| d.area), Some(Area::North));
        assert_eq!(catalog.dish_key("d-special")?, key);

        Ok(())
    }

    #[test]
    fn insert_dish_rejects_other_currency() -> TestResult {
        let mut catalog = Catalog::new();
        let diner = catalog.insert_restaurant("r-diner", restaurant("Diner", Area::North));
        catalog.insert_dish("d-a", dish(diner, Money::from_minor(700, EUR)))?;

        let result = catalog.insert_dish("d-b", dish(diner, Money::from_minor(700, GBP)));

        assert!(matches!(result, Err(CatalogError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn update_restaurant_moves_its_dishes() -> TestResult {
        let mut catalog = Catalog::new();
        let diner = catalog.insert_restaurant("r-diner", restaurant("Diner", Area::North));
        let key = catalog.insert_dish("d-a", dish(diner, Money::from_minor(700, EUR)))?;

        catalog.update_restaurant(diner, restaurant("Diner", Area::West))?;

        assert_eq!(catalog.dish(key).map(|d| d.area), Some(Area::West));
        assert_eq!(catalog.cart_line(key, 2)?.area(), Area::West);

        Ok(())
    }

    #[test]
    fn reinserting_a_restaurant_moves_its_dishes() -> TestResult {
        let mut catalog = Catalog::new();
        let diner = catalog.insert_restaurant("r-diner", restaurant("Diner", Area::North));
        let key = catalog.insert_dish("d-a", dish(diner, Money::from_minor(700, EUR)))?;

        let replaced = catalog.insert_restaurant("r-diner", restaurant("Diner", Area::West));

        assert_eq!(replaced, diner);
        assert_eq!(catalog.restaurant(diner).map(|r| r.area), Some(Area::West));
        assert_eq!(catalog.dish(key).map(|d| d.area), Some(Area::West));

        let cart = Cart::with_lines([catalog.cart_line(key, 1)?], EUR)?;
        let estimate = estimate(Area::North, &cart);

        assert_eq!(estimate.pickup_minutes(), 10);
        assert_eq!(estimate.delivery_minutes(), 10);

        Ok(())
    }

    #[test]
    fn update_unknown_restaurant_is_an_error() {
        let mut catalog = Catalog::new();
        let mut other = Catalog::new();
        let stranger = other.insert_restaurant("r-x", restaurant("Stranger", Area::East));

        assert!(matches!(
            catalog.update_restaurant(stranger, restaurant("Stranger", Area::West)),
            Err(CatalogError::RestaurantNotFound(_))
        ));
    }

    #[test]
    fn from_set_reads_the_bundled_demo_set() -> TestResult {
        let catalog = Catalog::from_set("demo")?;

        assert!(!catalog.restaurants().is_empty());
        assert!(catalog.dish_key("d-carbonara").is_ok());
        assert_eq!(catalog.currency()?, EUR);

        Ok(())
    }

    #[test]
    fn first_bad_dish_by_id_is_reported() -> TestResult {
        let dir = TempDir::new()?;
        let menu = r#"
dishes:
  d-zz:
    restaurant: r-pasta
    name: Broken Price
    price: "lots EUR"
  d-aa:
    restaurant: r-missing
    name: Orphan
    price: "5.00 EUR"
  d-mm:
    restaurant: r-pasta
    name: Wrong Money
    price: "5.00 XXX"
"#;
        write_set(&dir, "broken", menu)?;

        let result = Catalog::from_set_in(dir.path(), "broken");

        assert!(
            matches!(&result, Err(CatalogError::RestaurantNotFound(id)) if id == "r-missing"),
            "unexpected result: {result:?}"
        );

        Ok(())
    }

    #[test]
    fn availability_and_removal() -> TestResult {
        let mut catalog = Catalog::new();
        let diner = catalog.insert_restaurant("r-diner", restaurant("Diner", Area::North));
        let key = catalog.insert_dish("d-a", dish(diner, Money::from_minor(700, EUR)))?;

        catalog.set_dish_availability(key, false)?;
        assert_eq!(catalog.dish(key).map(|d| d.available), Some(false));

        assert!(catalog.remove_dish(key).is_some());
        assert!(catalog.dish(key).is_none());
        assert!(matches!(catalog.dish_key("d-a"), Err(CatalogError::DishNotFound(_))));
        assert!(matches!(
            catalog.set_dish_availability(key, true),
            Err(CatalogError::DishNotFound(_))
        ));

        Ok(())
    }

    #[test]
    fn menu_of_lists_only_that_restaurant() -> TestResult {
        let mut catalog = Catalog::new();
        let diner = catalog.insert_restaurant("r-diner", restaurant("Diner", Area::North));
        let cafe = catalog.insert_restaurant("r-cafe", restaurant("Cafe", Area::East));
        catalog.insert_dish("d-a", dish(diner, Money::from_minor(700, EUR)))?;
        catalog.insert_dish("d-b", dish(diner, Money::from_minor(800, EUR)))?;
        catalog.insert_dish("d-c", dish(cafe, Money::from_minor(300, EUR)))?;

        assert_eq!(catalog.menu_of(diner).count(), 2);
        assert_eq!(catalog.menu_of(cafe).count(), 1);

        Ok(())
    }
}
