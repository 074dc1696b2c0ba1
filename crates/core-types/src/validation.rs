//! The schema validator for `Product` payloads at the API boundary.
//!
//! Validation is lax about representation (numeric strings and integral floats
//! are coerced) but strict about presence: every field is required, and all
//! offending fields are reported together.

use crate::error::{FieldError, FieldErrorKind, ValidationError};
use crate::product::Product;
use serde_json::{Map, Value};

/// Validates an untyped JSON payload and produces a strictly-typed `Product`.
///
/// Unknown keys are ignored. No field-level business rules are applied, so a
/// negative price or quantity is accepted.
pub fn validate_product(payload: &Value) -> Result<Product, ValidationError> {
    let Some(object) = payload.as_object() else {
        return Err(ValidationError {
            errors: vec![FieldError::new(
                "body",
                FieldErrorKind::InvalidType,
                format!("expected a JSON object, found {}", type_name(payload)),
            )],
        });
    };

    let mut errors = Vec::new();

    let id = collect(&mut errors, field_i32(object, "id"));
    let name = collect(&mut errors, field_string(object, "name"));
    let description = collect(&mut errors, field_string(object, "description"));
    let price = collect(&mut errors, field_f64(object, "price"));
    let quantity = collect(&mut errors, field_i32(object, "quantity"));

    match (id, name, description, price, quantity) {
        (Some(id), Some(name), Some(description), Some(price), Some(quantity)) => Ok(Product {
            id,
            name,
            description,
            price,
            quantity,
        }),
        _ => Err(ValidationError { errors }),
    }
}

fn collect<T>(errors: &mut Vec<FieldError>, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn require<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a Value, FieldError> {
    match object.get(field) {
        Some(Value::Null) | None => Err(FieldError::new(
            field,
            FieldErrorKind::Missing,
            "field required",
        )),
        Some(value) => Ok(value),
    }
}

fn field_string(object: &Map<String, Value>, field: &str) -> Result<String, FieldError> {
    match require(object, field)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(invalid_type(field, "a string", other)),
    }
}

fn field_i32(object: &Map<String, Value>, field: &str) -> Result<i32, FieldError> {
    let value = require(object, field)?;
    let wide = match value {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i,
            // Integral floats such as `15.0` are accepted.
            (None, Some(f)) if f.is_finite() && f.fract() == 0.0 => {
                if f < i64::MIN as f64 || f > i64::MAX as f64 {
                    return Err(out_of_range(field));
                }
                f as i64
            }
            _ => return Err(invalid_type(field, "an integer", value)),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid_type(field, "an integer", value))?,
        other => return Err(invalid_type(field, "an integer", other)),
    };
    i32::try_from(wide).map_err(|_| out_of_range(field))
}

fn field_f64(object: &Map<String, Value>, field: &str) -> Result<f64, FieldError> {
    let value = require(object, field)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(f) if f.is_finite() => Ok(f),
        _ => Err(invalid_type(field, "a number", value)),
    }
}

fn invalid_type(field: &str, expected: &str, found: &Value) -> FieldError {
    FieldError::new(
        field,
        FieldErrorKind::InvalidType,
        format!("expected {expected}, found {}", type_name(found)),
    )
}

fn out_of_range(field: &str) -> FieldError {
    FieldError::new(
        field,
        FieldErrorKind::OutOfRange,
        format!("value must fit in a 32-bit signed integer ({}..={})", i32::MIN, i32::MAX),
    )
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_a_well_formed_payload() {
        let product = validate_product(&json!({
            "id": 2,
            "name": "Mouse",
            "description": "wireless",
            "price": 20.0,
            "quantity": 100
        }))
        .unwrap();

        assert_eq!(
            product,
            Product {
                id: 2,
                name: "Mouse".into(),
                description: "wireless".into(),
                price: 20.0,
                quantity: 100,
            }
        );
    }

    #[test]
    fn coerces_numeric_strings_and_integral_floats() {
        let product = validate_product(&json!({
            "id": "1",
            "name": "phone",
            "description": "samsung",
            "price": "54000.3",
            "quantity": 15.0
        }))
        .unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.price, 54000.3);
        assert_eq!(product.quantity, 15);
    }

    #[test]
    fn integer_price_is_accepted_as_float() {
        let product = validate_product(&json!({
            "id": 4, "name": "Laptop", "description": "samsung", "price": 740000, "quantity": 5
        }))
        .unwrap();
        assert_eq!(product.price, 740000.0);
    }

    #[test]
    fn negative_values_are_not_rejected() {
        let product = validate_product(&json!({
            "id": -1, "name": "", "description": "", "price": -3.5, "quantity": -10
        }))
        .unwrap();
        assert_eq!(product.quantity, -10);
        assert_eq!(product.price, -3.5);
    }

    #[test]
    fn reports_every_missing_field() {
        let err = validate_product(&json!({ "name": "Mouse" })).unwrap_err();
        assert_eq!(err.fields(), vec!["id", "description", "price", "quantity"]);
        assert!(err.errors.iter().all(|e| e.kind == FieldErrorKind::Missing));
    }

    #[test]
    fn null_counts_as_missing() {
        let err = validate_product(&json!({
            "id": 1, "name": null, "description": "d", "price": 1.0, "quantity": 1
        }))
        .unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "name");
        assert_eq!(err.errors[0].kind, FieldErrorKind::Missing);
    }

    #[test]
    fn rejects_wrong_types() {
        let err = validate_product(&json!({
            "id": 1.5,
            "name": 42,
            "description": "ok",
            "price": "cheap",
            "quantity": true
        }))
        .unwrap_err();

        assert_eq!(err.fields(), vec!["id", "name", "price", "quantity"]);
        assert!(err.errors.iter().all(|e| e.kind == FieldErrorKind::InvalidType));
    }

    #[test]
    fn rejects_integers_outside_i32() {
        let err = validate_product(&json!({
            "id": 3_000_000_000i64, "name": "n", "description": "d", "price": 1, "quantity": 1
        }))
        .unwrap_err();
        assert_eq!(err.errors[0].kind, FieldErrorKind::OutOfRange);
    }

    #[test]
    fn rejects_non_object_bodies() {
        let err = validate_product(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.fields(), vec!["body"]);
        assert!(err.to_string().contains("expected a JSON object"));
    }
}
