//! Sample catalogue loaded into a fresh store.

use rust_decimal::Decimal;

use super::model::NewPopsicle;

pub fn sample_popsicles() -> Vec<NewPopsicle> {
    vec![
        sample("Classic Vanilla", "Vanilla", 299, "Creamy vanilla popsicle", 50),
        sample("Strawberry Delight", "Strawberry", 349, "Fresh strawberry flavor", 30),
        sample("Chocolate Fudge", "Chocolate", 399, "Rich chocolate with fudge swirl", 25),
        sample("Orange Burst", "Orange", 279, "Zesty orange citrus", 40),
    ]
}

fn sample(name: &str, flavor: &str, cents: i64, description: &str, quantity: u32) -> NewPopsicle {
    NewPopsicle {
        name: name.to_string(),
        flavor: flavor.to_string(),
        price: Decimal::new(cents, 2),
        description: Some(description.to_string()),
        quantity,
    }
}
