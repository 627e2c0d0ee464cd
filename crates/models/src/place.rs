use serde::{Deserialize, Deserializer, Serialize};

/// Decode an absent or `null` field as `T::default()`.
///
/// Older snapshots store a place without reviews as `"reviews": null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single review attached to a place. Never addressed on its own.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: i64,
}

/// A named catalog entry.
///
/// `name` must be present and a string. Every other field that is missing
/// or `null` decodes to its zero value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Place {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: Vec<Review>,
}

impl Place {
    pub fn new(name: impl Into<String>, description: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            reviews: Vec::new(),
        }
    }

    pub fn with_review(mut self, text: impl Into<String>, rating: i64) -> Self {
        self.reviews.push(Review { text: text.into(), rating });
        self
    }
}
