//! Request schema validation.
//!
//! Create payloads are checked field by field against the [`Item`] shape so
//! that every missing or mistyped field is reported at once, with its
//! location, before the handler touches the store.

use std::num::IntErrorKind;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

use crate::error::{ApiError, FieldError};
use crate::store::{default_is_available, Item};

const MSG_MISSING: &str = "Field required";

/// Validate a parsed JSON body as an [`Item`].
///
/// `is_available` falls back to `true` when absent. Unknown fields are ignored.
pub fn validate_item(body: &Value) -> Result<Item, Vec<FieldError>> {
    let Some(object) = body.as_object() else {
        return Err(vec![FieldError::new(
            ["body"],
            "Input should be a valid dictionary or object to extract fields from",
            "model_attributes_type",
        )]);
    };

    let mut errors = Vec::new();

    let id = required(object, "id", &mut errors).and_then(|v| check(as_int(v), "id", &mut errors));
    let name = required(object, "name", &mut errors)
        .and_then(|v| check(as_string(v), "name", &mut errors));
    let price = required(object, "price", &mut errors)
        .and_then(|v| check(as_float(v), "price", &mut errors));
    let is_available = match object.get("is_available") {
        None => Some(default_is_available()),
        Some(v) => check(as_bool(v), "is_available", &mut errors),
    };

    match (id, name, price, is_available) {
        (Some(id), Some(name), Some(price), Some(is_available)) if errors.is_empty() => Ok(Item {
            id,
            name,
            price,
            is_available,
        }),
        _ => Err(errors),
    }
}

/// Parse a path segment as an item id.
pub fn parse_item_id(raw: &str) -> Result<i64, FieldError> {
    parse_int_str(raw).map_err(|(msg, kind)| FieldError::new(["path", "item_id"], msg, kind))
}

/// Parse a raw request body as JSON.
///
/// An empty body is reported as a missing body rather than bad JSON.
pub fn parse_body(bytes: &[u8]) -> Result<Value, FieldError> {
    if bytes.is_empty() {
        return Err(FieldError::new(["body"], MSG_MISSING, "missing"));
    }
    serde_json::from_slice(bytes).map_err(|e| {
        FieldError::new(["body"], format!("JSON decode error: {e}"), "json_invalid")
    })
}

/// (message, kind) pair describing why a value was rejected.
type Rejected = (&'static str, &'static str);

const INT_TYPE: Rejected = ("Input should be a valid integer", "int_type");
const INT_PARSING: Rejected = (
    "Input should be a valid integer, unable to parse string as an integer",
    "int_parsing",
);
const INT_FRACTION: Rejected = (
    "Input should be a valid integer, got a number with a fractional part",
    "int_from_float",
);
const INT_SIZE: Rejected = (
    "Input should be a valid integer, value is outside the 64-bit range",
    "int_parsing_size",
);
const FLOAT_TYPE: Rejected = ("Input should be a valid number", "float_type");
const FLOAT_PARSING: Rejected = (
    "Input should be a valid number, unable to parse string as a number",
    "float_parsing",
);
const FLOAT_FINITE: Rejected = ("Input should be a finite number", "finite_number");
const STRING_TYPE: Rejected = ("Input should be a valid string", "string_type");
const BOOL_TYPE: Rejected = ("Input should be a valid boolean", "bool_type");
const BOOL_PARSING: Rejected = (
    "Input should be a valid boolean, unable to interpret input",
    "bool_parsing",
);

fn required<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a Value> {
    let value = object.get(field);
    if value.is_none() {
        errors.push(FieldError::new(["body", field], MSG_MISSING, "missing"));
    }
    value
}

fn check<T>(
    result: Result<T, Rejected>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err((msg, kind)) => {
            errors.push(FieldError::new(["body", field], msg, kind));
            None
        }
    }
}

fn parse_int_str(raw: &str) -> Result<i64, Rejected> {
    raw.trim().parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => INT_SIZE,
        _ => INT_PARSING,
    })
}

/// Integers, integral floats inside the i64 range, and integer strings.
fn as_int(value: &Value) -> Result<i64, Rejected> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if n.is_u64() {
                return Err(INT_SIZE);
            }
            let Some(f) = n.as_f64() else {
                return Err(INT_TYPE);
            };
            if f.fract() != 0.0 {
                return Err(INT_FRACTION);
            }
            // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
            if f < i64::MIN as f64 || f >= i64::MAX as f64 {
                return Err(INT_SIZE);
            }
            Ok(f as i64)
        }
        Value::String(s) => parse_int_str(s),
        _ => Err(INT_TYPE),
    }
}

fn as_string(value: &Value) -> Result<String, Rejected> {
    value.as_str().map(str::to_owned).ok_or(STRING_TYPE)
}

/// Numbers and strings holding a finite number.
fn as_float(value: &Value) -> Result<f64, Rejected> {
    match value {
        Value::Number(n) => n.as_f64().ok_or(FLOAT_TYPE),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(f),
            Ok(_) => Err(FLOAT_FINITE),
            Err(_) => Err(FLOAT_PARSING),
        },
        _ => Err(FLOAT_TYPE),
    }
}

/// Booleans, 0/1, and the usual yes/no spellings (case-insensitive).
fn as_bool(value: &Value) -> Result<bool, Rejected> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(BOOL_PARSING),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "on" | "t" | "true" | "y" | "yes" => Ok(true),
            "0" | "off" | "f" | "false" | "n" | "no" => Ok(false),
            _ => Err(BOOL_PARSING),
        },
        _ => Err(BOOL_TYPE),
    }
}

/// JSON body extractor that yields a validated [`Item`].
///
/// Rejects with 422 and field-level detail.
pub struct ItemPayload(pub Item);

#[async_trait]
impl<S> FromRequest<S> for ItemPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let body = parse_body(&bytes)
            .map_err(|e| ApiError::Validation(vec![e]).into_response())?;

        validate_item(&body)
            .map(ItemPayload)
            .map_err(|errors| ApiError::Validation(errors).into_response())
    }
}

/// `{item_id}` path extractor.
///
/// Rejects non-integer ids with 422.
pub struct ItemId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        parse_item_id(&raw)
            .map(ItemId)
            .map_err(|e| ApiError::Validation(vec![e]).into_response())
    }
}
