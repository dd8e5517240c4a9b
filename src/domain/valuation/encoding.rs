use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Code used for categories the table has never seen.
pub const UNKNOWN_CODE: i64 = 0;

/// Field name -> raw category -> integer code, as fitted at training time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodingTable {
    fields: HashMap<String, HashMap<String, i64>>,
}

impl EncodingTable {
    pub fn new(fields: HashMap<String, HashMap<String, i64>>) -> Self {
        Self { fields }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn categories(&self, field: &str) -> usize {
        self.fields.get(field).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Outcome of a category lookup.
///
/// `Unknown` is kept distinct from a stored code of 0 so callers can log
/// it, while [`Encoded::code`] still yields 0 for the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoded {
    Known(i64),
    Unknown,
}

impl Encoded {
    pub fn code(self) -> i64 {
        match self {
            Encoded::Known(code) => code,
            Encoded::Unknown => UNKNOWN_CODE,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Encoded::Known(_))
    }
}

/// Maps raw categorical values to the integer codes the model was trained on.
#[derive(Debug, Clone, Default)]
pub struct CategoryEncoder {
    table: EncodingTable,
}

impl CategoryEncoder {
    pub fn new(table: EncodingTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &EncodingTable {
        &self.table
    }

    pub fn lookup(&self, field: &str, raw_value: &str) -> Encoded {
        self.table
            .fields
            .get(field)
            .and_then(|values| values.get(raw_value))
            .map_or(Encoded::Unknown, |code| Encoded::Known(*code))
    }

    /// Stored code for `(field, raw_value)`, or 0 when either is unknown.
    pub fn encode(&self, field: &str, raw_value: &str) -> i64 {
        self.lookup(field, raw_value).code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> CategoryEncoder {
        let table: EncodingTable = serde_json::from_str(
            r#"{
                "Brand": {"Bajaj": 0, "Honda": 3, "KTM": 7},
                "Bike Type": {"E-bikes": 0, "Motorbikes": 1, "Scooters": 2}
            }"#,
        )
        .unwrap();
        CategoryEncoder::new(table)
    }

    #[test]
    fn test_known_values_return_stored_code() {
        let enc = encoder();
        assert_eq!(enc.encode("Brand", "KTM"), 7);
        assert_eq!(enc.encode("Bike Type", "Scooters"), 2);
    }

    #[test]
    fn test_unknown_value_and_unknown_field_return_zero() {
        let enc = encoder();
        assert_eq!(enc.encode("Brand", "Ducati"), 0);
        assert_eq!(enc.encode("Colour", "Red"), 0);
        assert_eq!(enc.encode("brand", "KTM"), 0);
    }

    #[test]
    fn test_unknown_is_distinguishable_from_stored_zero() {
        let enc = encoder();
        assert_eq!(enc.lookup("Brand", "Bajaj"), Encoded::Known(0));
        assert_eq!(enc.lookup("Brand", "Ducati"), Encoded::Unknown);
        assert_eq!(
            enc.lookup("Brand", "Bajaj").code(),
            enc.lookup("Brand", "Ducati").code()
        );
    }

    #[test]
    fn test_table_introspection() {
        let enc = encoder();
        assert_eq!(enc.table().categories("Brand"), 3);
        assert_eq!(enc.table().categories("Model"), 0);
        assert_eq!(enc.table().field_names().count(), 2);
    }
}
