use folio_kernel::ApiVersion;
use serde::Serialize;

/// Flat book schema served by API version 1.
pub mod v1 {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Book {
        pub id: String,
        pub name: String,
        /// Author display name
        pub author: String,
    }
}

/// Book schema with an embedded author, served by API version 2.
pub mod v2 {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Author {
        pub id: String,
        pub name: String,
        /// Free-form date text, not validated
        pub birthdate: String,
        pub nationality: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Book {
        pub id: String,
        pub name: String,
        pub author: Author,
        #[serde(deserialize_with = "lenient_year")]
        pub publication_year: i32,
        pub genre: String,
    }

    /// Accepts `1949` as well as `"1949"`.
    fn lenient_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Year {
            Number(i32),
            Text(String),
        }

        match Year::deserialize(deserializer)? {
            Year::Number(year) => Ok(year),
            Year::Text(text) => text
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid publication year '{text}'"))),
        }
    }
}

/// A book rendered in the schema of one API version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VersionedBook {
    V1(v1::Book),
    V2(v2::Book),
}

impl VersionedBook {
    /// Validate a stored record against the schema of `version`.
    pub fn shape(version: ApiVersion, record: serde_json::Value) -> Result<Self, serde_json::Error> {
        match version {
            ApiVersion::V1 => serde_json::from_value(record).map(VersionedBook::V1),
            ApiVersion::V2 => serde_json::from_value(record).map(VersionedBook::V2),
        }
    }

    pub fn version(&self) -> ApiVersion {
        match self {
            VersionedBook::V1(_) => ApiVersion::V1,
            VersionedBook::V2(_) => ApiVersion::V2,
        }
    }
}
