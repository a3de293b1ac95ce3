//! # Request Validation
//!
//! Turns transfer bodies into store inputs. Every failing field is
//! reported, not just the first one.

use rust_decimal::Decimal;

use super::dto::{CreatePopsicleRequest, UpdatePopsicleRequest};
use super::errors::{FieldError, PopsicleError, PopsicleResult};
use super::model::{NewPopsicle, Patch, PopsiclePatch};

pub const NAME_MAX_CHARS: usize = 100;
pub const FLAVOR_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Smallest accepted price (0.01)
pub fn min_price() -> Decimal {
    Decimal::new(1, 2)
}

/// Largest accepted price (999.99)
pub fn max_price() -> Decimal {
    Decimal::new(99999, 2)
}

const QUANTITY_MAX: i64 = i32::MAX as i64;

/// Validates a create/replace body.
///
/// # Errors
///
/// Returns `PopsicleError::Validation` listing every violated field.
pub fn validate_create(request: &CreatePopsicleRequest) -> PopsicleResult<NewPopsicle> {
    let mut errors = Vec::new();

    check_required_text(&mut errors, "name", "Name", &request.name, NAME_MAX_CHARS);
    check_required_text(&mut errors, "flavor", "Flavor", &request.flavor, FLAVOR_MAX_CHARS);
    check_price(&mut errors, request.price);
    if let Some(description) = &request.description {
        check_description(&mut errors, description);
    }
    let quantity = check_quantity(&mut errors, request.quantity);

    match quantity {
        Some(quantity) if errors.is_empty() => Ok(NewPopsicle {
            name: request.name.clone(),
            flavor: request.flavor.clone(),
            price: request.price,
            description: request.description.clone(),
            quantity,
        }),
        _ => Err(PopsicleError::Validation(errors)),
    }
}

/// Validates a partial update body. Only provided values are checked.
///
/// # Errors
///
/// Returns `PopsicleError::Validation` listing every violated field.
pub fn validate_patch(request: &UpdatePopsicleRequest) -> PopsicleResult<PopsiclePatch> {
    let mut errors = Vec::new();

    if let Some(name) = request.name.as_value() {
        check_max_chars(&mut errors, "name", "Name", name, NAME_MAX_CHARS);
    }
    if let Some(flavor) = request.flavor.as_value() {
        check_max_chars(&mut errors, "flavor", "Flavor", flavor, FLAVOR_MAX_CHARS);
    }
    if let Some(price) = request.price.as_value() {
        check_price(&mut errors, *price);
    }
    if let Some(description) = request.description.as_value() {
        check_description(&mut errors, description);
    }
    let quantity = match &request.quantity {
        Patch::Value(q) => match check_quantity(&mut errors, *q) {
            Some(q) => Patch::Value(q),
            None => Patch::Absent,
        },
        other => other.clone().map(|_| 0),
    };

    if !errors.is_empty() {
        return Err(PopsicleError::Validation(errors));
    }

    Ok(PopsiclePatch {
        name: request.name.clone(),
        flavor: request.flavor.clone(),
        price: request.price.clone(),
        description: request.description.clone(),
        quantity,
    })
}

fn check_required_text(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    label: &str,
    value: &str,
    max: usize,
) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{} is required", label)));
    } else {
        check_max_chars(errors, field, label, value, max);
    }
}

fn check_max_chars(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    label: &str,
    value: &str,
    max: usize,
) {
    if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("{} cannot exceed {} characters", label, max),
        ));
    }
}

fn check_description(errors: &mut Vec<FieldError>, value: &str) {
    check_max_chars(errors, "description", "Description", value, DESCRIPTION_MAX_CHARS);
}

fn check_price(errors: &mut Vec<FieldError>, price: Decimal) {
    if price < min_price() || price > max_price() {
        errors.push(FieldError::new(
            "price",
            "Price must be between 0.01 and 999.99",
        ));
    }
}

fn check_quantity(errors: &mut Vec<FieldError>, quantity: i64) -> Option<u32> {
    if !(0..=QUANTITY_MAX).contains(&quantity) {
        errors.push(FieldError::new("quantity", "Quantity must be non-negative"));
        return None;
    }
    u32::try_from(quantity).ok()
}
