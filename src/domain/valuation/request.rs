use crate::domain::errors::PredictionError;
use serde_json::{Map, Value};

pub const BIKE_TYPE: &str = "Bike Type";
pub const BRAND: &str = "Brand";
pub const EDITION: &str = "Edition";
pub const MODEL: &str = "Model";
pub const YEAR: &str = "Year";
pub const MILEAGE: &str = "Mileage";
pub const CAPACITY: &str = "Capacity";

/// Fields every prediction request must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 7] = [
    BIKE_TYPE, BRAND, EDITION, MODEL, YEAR, MILEAGE, CAPACITY,
];

/// Categorical fields, in the order they enter the feature vector.
pub const CATEGORICAL_FIELDS: [&str; 4] = [BIKE_TYPE, BRAND, EDITION, MODEL];

/// A prediction request as received from a client.
///
/// The raw JSON object is kept as-is: presence is checked by
/// [`BikeRequest::missing_fields`], and values are coerced lazily so that
/// numeric problems surface as value errors rather than missing-field errors.
#[derive(Debug, Clone, PartialEq)]
pub struct BikeRequest {
    fields: Map<String, Value>,
}

impl BikeRequest {
    pub fn from_value(value: Value) -> Result<Self, PredictionError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(PredictionError::InvalidBody {
                found: json_type_name(&other).to_string(),
            }),
        }
    }

    /// Required fields absent from the request, in `REQUIRED_FIELDS` order.
    /// A field explicitly set to `null` counts as present.
    pub fn missing_fields(&self) -> Vec<String> {
        REQUIRED_FIELDS
            .iter()
            .filter(|field| !self.fields.contains_key(**field))
            .map(|field| field.to_string())
            .collect()
    }

    /// String form of a categorical value, as used for encoder lookups.
    pub fn category(&self, field: &str) -> Option<String> {
        self.fields.get(field).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Finite numeric value of `field`. Numeric strings are accepted.
    pub fn number(&self, field: &str) -> Result<f64, PredictionError> {
        let invalid = |reason: String| PredictionError::InvalidNumber {
            field: field.to_string(),
            reason,
        };

        let value = self
            .fields
            .get(field)
            .ok_or_else(|| invalid("field is absent".to_string()))?;

        let number = match value {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| invalid(format!("{} is not representable as f64", n)))?,
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| invalid(format!("could not parse {:?}", s)))?,
            other => {
                return Err(invalid(format!(
                    "expected a number, got {}",
                    json_type_name(other)
                )));
            }
        };

        if !number.is_finite() {
            return Err(invalid(format!("{} is not finite", number)));
        }
        Ok(number)
    }

    /// Integral value of `field`, truncated toward zero.
    pub fn integer(&self, field: &str) -> Result<i64, PredictionError> {
        let number = self.number(field)?;
        if number.abs() >= i64::MAX as f64 {
            return Err(PredictionError::InvalidNumber {
                field: field.to_string(),
                reason: format!("{} is out of range", number),
            });
        }
        Ok(number.trunc() as i64)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
