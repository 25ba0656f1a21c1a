//! Customers

use slotmap::new_key_type;

use crate::areas::Area;

new_key_type! {
    /// Customer Key
    pub struct CustomerKey;
}

/// Customer
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// First name
    pub name: String,

    /// Last name
    pub last_name: String,

    /// Delivery address
    pub address: String,

    /// Contact phone number
    pub phone: String,

    /// Home delivery zone
    pub area: Area,
}

impl Customer {
    /// First and last name joined for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_first_and_last() {
        let customer = Customer {
            name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "1 Analytical Way".to_string(),
            phone: "555-0100".to_string(),
            area: Area::North,
        };

        assert_eq!(customer.full_name(), "Ada Lovelace");
    }
}
