//! Product records as scraped from storefront listing pages.
//!
//! ## Key presence
//!
//! The sites in scope do not agree on which keys a record carries. Foreign
//! Fortune always writes `"description": null`, Le Chocolat writes a
//! description string (or `null`), and Trader Joe's omits `description`
//! entirely but adds a `weight`. [`Field`] keeps "key absent" and "key present
//! with `null`" apart so that a batch serialises with exactly the shape its
//! extractor produced, and so that batches read back from disk keep that shape.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value whose key may be absent, explicitly `null`, or set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// The key is not present in the record.
    Absent,
    /// The key is present with a `null` value.
    Null,
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    /// `None` maps to [`Field::Null`]: the key is present but empty.
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Field::Null, Field::Value)
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// Returns the value, treating both absent and `null` as `None`.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Absent | Field::Null => None,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => serializer.serialize_some(v),
            // `Absent` is skipped by `skip_serializing_if` on the owning struct.
            Field::Absent | Field::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A missing key never reaches this impl; `#[serde(default)]` yields `Absent`.
        Option::<T>::deserialize(deserializer).map(Field::from_option)
    }
}

/// One catalog item extracted from a product card.
///
/// No field is required at extraction time; required-ness is enforced by
/// [`crate::validation::Validator`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub title: Option<String>,

    /// Free-form display price, e.g. `"$12.50"`, `"£3,400"`, `"from $9.99"`
    /// or `"Not available"`.
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,

    /// Absolute image URL once normalized by the extractor.
    #[serde(default)]
    pub image_url: Option<String>,

    /// Package size shown next to the price (Trader Joe's only). Part of the
    /// uniqueness key when set.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub weight: Field<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,

    /// Per-variant entries, when a source lists them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<ModelRecord>>,
}

/// A purchasable variant listed under a [`ProductRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

/// Parses a JSON array of records, e.g. a previously written output file.
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] when the text is not a JSON
/// array of objects.
pub fn parse_batch(json: &str) -> Result<Vec<ProductRecord>, serde_json::Error> {
    serde_json::from_str(json)
}
