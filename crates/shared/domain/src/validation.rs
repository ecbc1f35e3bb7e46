//! Input validation and normalization.
//!
//! Every function is pure and fails fast on the first broken rule, returning
//! a [`DomainError::Validation`] whose [`ErrorCode`] names that rule.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::constants::{MAX_QUANTITY, MAX_SWEET_NAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_SWEET_NAME_LENGTH};
use crate::error::{DomainError, DomainResult, ErrorCode};
use crate::sweet::{NewSweet, SweetChanges, SweetFilter, SweetInput, SweetSearch};
use crate::user::Registration;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex is valid"));

fn invalid(code: ErrorCode, msg: impl Into<String>) -> DomainError {
    DomainError::validation(code, msg)
}

/// Trim and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// =============================================================================
// Accounts
// =============================================================================

pub fn validate_email(email: &str) -> DomainResult<()> {
    if email.is_empty() || !EMAIL_REGEX.is_match(email) {
        return Err(invalid(ErrorCode::InvalidEmail, "Invalid email format"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(invalid(
            ErrorCode::WeakPassword,
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    Ok(())
}

/// Check name, then email, then password.
///
/// The returned registration carries the trimmed name and the normalized
/// email; the password is passed through untouched.
pub fn validate_register_input(name: &str, email: &str, password: &str) -> DomainResult<Registration> {
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid(ErrorCode::MissingName, "Name is required"));
    }

    let email = normalize_email(email);
    validate_email(&email)?;
    validate_password(password)?;

    Ok(Registration {
        name: name.to_string(),
        email,
        password: password.to_string(),
    })
}

/// Check login fields and return the normalized email.
pub fn validate_login_input(email: &str, password: &str) -> DomainResult<String> {
    let email = normalize_email(email);
    if email.is_empty() {
        return Err(invalid(ErrorCode::MissingEmail, "Email is required"));
    }
    validate_email(&email)?;
    if password.is_empty() {
        return Err(invalid(ErrorCode::MissingPassword, "Password is required"));
    }
    Ok(email)
}

// =============================================================================
// Sweets
// =============================================================================

pub fn validate_sweet_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    let len = name.chars().count();

    if len == 0 {
        return Err(invalid(ErrorCode::MissingName, "Name is required"));
    }
    if len < MIN_SWEET_NAME_LENGTH {
        return Err(invalid(
            ErrorCode::NameTooShort,
            format!("Name must be at least {} characters", MIN_SWEET_NAME_LENGTH),
        ));
    }
    if len > MAX_SWEET_NAME_LENGTH {
        return Err(invalid(
            ErrorCode::NameTooLong,
            format!("Name cannot exceed {} characters", MAX_SWEET_NAME_LENGTH),
        ));
    }
    Ok(name.to_string())
}

pub fn validate_sweet_category(category: &str) -> DomainResult<String> {
    let category = category.trim();
    if category.is_empty() {
        return Err(invalid(ErrorCode::MissingCategory, "Category is required"));
    }
    Ok(category.to_string())
}

pub fn validate_sweet_price(price: Option<f64>) -> DomainResult<f64> {
    let price = match price {
        Some(p) if p.is_finite() => p,
        _ => return Err(invalid(ErrorCode::InvalidPrice, "Price must be a valid number")),
    };
    if price < 0.0 {
        return Err(invalid(ErrorCode::NegativePrice, "Price cannot be negative"));
    }
    // Normalize -0.0
    Ok(price + 0.0)
}

/// Stock level for create/update. Zero is allowed.
pub fn validate_sweet_quantity(quantity: Option<f64>) -> DomainResult<i64> {
    let quantity = match quantity {
        Some(q) if !q.is_nan() && q >= 0.0 => q,
        _ => {
            return Err(invalid(
                ErrorCode::NegativeQuantity,
                "Quantity cannot be negative",
            ))
        }
    };
    whole_number(quantity)
}

/// Amount for purchase/restock. Must be strictly positive.
pub fn validate_inventory_quantity(quantity: Option<f64>) -> DomainResult<i64> {
    let quantity = match quantity {
        Some(q) if !q.is_nan() => q,
        _ => {
            return Err(invalid(
                ErrorCode::InvalidQuantity,
                "Quantity must be a valid number",
            ))
        }
    };
    if quantity <= 0.0 {
        return Err(invalid(
            ErrorCode::InvalidQuantity,
            "Quantity must be greater than 0",
        ));
    }
    whole_number(quantity)
}

fn whole_number(quantity: f64) -> DomainResult<i64> {
    if !quantity.is_finite() || quantity.fract() != 0.0 || quantity > MAX_QUANTITY {
        return Err(invalid(
            ErrorCode::InvalidQuantity,
            "Quantity must be a whole number",
        ));
    }
    Ok(quantity as i64)
}

/// Full create payload: name, category, price, quantity, in that order.
pub fn validate_sweet_input(input: &SweetInput) -> DomainResult<NewSweet> {
    let name = validate_sweet_name(input.name.as_deref().unwrap_or_default())?;
    let category = validate_sweet_category(input.category.as_deref().unwrap_or_default())?;
    let price = validate_sweet_price(input.price)?;
    let quantity = validate_sweet_quantity(input.quantity)?;

    Ok(NewSweet {
        name,
        category,
        price,
        quantity,
    })
}

/// Partial update payload. Only supplied fields are checked, but a supplied
/// empty name or category is still rejected.
pub fn validate_sweet_update_input(input: &SweetInput) -> DomainResult<SweetChanges> {
    let name = input.name.as_deref().map(validate_sweet_name).transpose()?;
    let category = input
        .category
        .as_deref()
        .map(validate_sweet_category)
        .transpose()?;
    let price = input
        .price
        .map(|p| validate_sweet_price(Some(p)))
        .transpose()?;
    let quantity = input
        .quantity
        .map(|q| validate_sweet_quantity(Some(q)))
        .transpose()?;

    Ok(SweetChanges {
        name,
        category,
        price,
        quantity,
    })
}

/// Check price bounds and drop blank text filters.
pub fn validate_search_query(query: &SweetSearch) -> DomainResult<SweetFilter> {
    if let Some(min) = query.min_price {
        if !min.is_finite() || min < 0.0 {
            return Err(invalid(
                ErrorCode::InvalidMinPrice,
                "Minimum price cannot be negative",
            ));
        }
    }
    if let Some(max) = query.max_price {
        if !max.is_finite() || max < 0.0 {
            return Err(invalid(
                ErrorCode::InvalidMaxPrice,
                "Maximum price cannot be negative",
            ));
        }
    }
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            return Err(invalid(
                ErrorCode::InvalidPriceRange,
                "Minimum price cannot be greater than maximum price",
            ));
        }
    }

    Ok(SweetFilter {
        name: non_blank(query.name.as_deref()),
        category: non_blank(query.category.as_deref()),
        min_price: query.min_price,
        max_price: query.max_price,
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn validate_sweet_id(id: &str) -> DomainResult<Uuid> {
    let id = id.trim();
    if id.is_empty() {
        return Err(invalid(ErrorCode::InvalidId, "Sweet ID is required"));
    }
    Uuid::parse_str(id).map_err(|_| invalid(ErrorCode::InvalidId, "Invalid sweet ID format"))
}
