//! Sample records for each of the supported schemas.
//!
//! Three incompatible record shapes exist side by side. A running service
//! picks exactly one of them (see [SchemaVariant]) and every record it stores
//! has that shape.
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_with::{DefaultOnNull, serde_as, skip_serializing_none};
use std::fmt::Debug;
use strum_macros::{Display, EnumIter, EnumString};

/// The id given to the record that every store is seeded with
pub const SEED_ID: i64 = 0;

/// The initial value of a freshly seeded store's id counter. The counter is
/// incremented before each assignment, so the first created record gets
/// `INITIAL_COUNTER + 1`.
pub const INITIAL_COUNTER: i64 = 1;

const SEED_TITLE: &str = "Lake Cromwell";
const SEED_SOURCE: &str = "Inlet Stream";
const SEED_NOTES: &str = "Protected lake within the Montreal University field station";

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchemaVariant {
    General,
    #[default]
    Expanded,
    Minimal,
}

/// Common behavior of every record shape that can live in a
/// [SampleStore](crate::store::SampleStore)
pub trait Record: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    const SCHEMA: SchemaVariant;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);

    /// The record a new store starts out with
    fn seed() -> Self;

    /// Decode a record from a JSON document. Fields that are missing from the
    /// document are left unset, and a missing or null `id` decodes as `0`.
    fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(Error::InvalidPayload)
    }
}

/// A general-purpose sample: where and when it was taken plus a couple of
/// basic measurements.
#[serde_as]
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneralSample {
    #[serde_as(as = "DefaultOnNull")]
    pub id: i64,
    pub title: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
    pub temperature: Option<f64>,
    #[serde(rename = "pH")]
    pub ph: Option<f64>,
}

impl Record for GeneralSample {
    const SCHEMA: SchemaVariant = SchemaVariant::General;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Self {
        Self {
            id: SEED_ID,
            title: Some(SEED_TITLE.to_string()),
            location: Some(SEED_SOURCE.to_string()),
            notes: Some(SEED_NOTES.to_string()),
            ..Default::default()
        }
    }
}

/// A full water-quality sample with stream geometry and probe readings.
#[serde_as]
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExpandedSample {
    #[serde_as(as = "DefaultOnNull")]
    pub id: i64,
    pub title: Option<String>,
    pub source: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
    /// whole degrees
    pub temperature: Option<i64>,
    pub width: Option<f64>,
    pub depth: Option<f64>,
    #[serde(rename = "pH")]
    pub ph: Option<f64>,
    pub dissolved_oxygen: Option<f64>,
    pub conductivity: Option<f64>,
    #[serde(rename = "ORP")]
    pub orp: Option<f64>,
    pub discharge: Option<f64>,
}

impl Record for ExpandedSample {
    const SCHEMA: SchemaVariant = SchemaVariant::Expanded;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Self {
        Self {
            id: SEED_ID,
            title: Some(SEED_TITLE.to_string()),
            source: Some(SEED_SOURCE.to_string()),
            notes: Some(SEED_NOTES.to_string()),
            ..Default::default()
        }
    }
}

#[serde_as]
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MinimalSample {
    #[serde_as(as = "DefaultOnNull")]
    pub id: i64,
    pub title: Option<String>,
    pub notes: Option<String>,
}

impl Record for MinimalSample {
    const SCHEMA: SchemaVariant = SchemaVariant::Minimal;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn seed() -> Self {
        Self {
            id: SEED_ID,
            title: Some(SEED_TITLE.to_string()),
            notes: Some(SEED_NOTES.to_string()),
        }
    }
}
