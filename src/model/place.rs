use crate::core::geo::LatLng;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Opaque place identifier assigned by the entity store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlaceId(pub String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for PlaceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // some exports carry numeric ids
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => PlaceId(id),
            RawId::Number(id) => PlaceId(id.to_string()),
        })
    }
}

/// Place category; anything outside the known set is kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Restaurant,
    Activity,
    Bar,
    Cafe,
    Landmark,
    Other(String),
}

impl Category {
    pub const KNOWN: [Category; 5] = [
        Category::Restaurant,
        Category::Activity,
        Category::Bar,
        Category::Cafe,
        Category::Landmark,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Activity => "activity",
            Category::Bar => "bar",
            Category::Cafe => "cafe",
            Category::Landmark => "landmark",
            Category::Other(other) => other,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Restaurant => "Restaurant",
            Category::Activity => "Activity",
            Category::Bar => "Bar",
            Category::Cafe => "Cafe",
            Category::Landmark => "Landmark",
            Category::Other(other) => other,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "restaurant" => Category::Restaurant,
            "activity" => Category::Activity,
            "bar" => Category::Bar,
            "cafe" => Category::Cafe,
            "landmark" => Category::Landmark,
            _ => Category::Other(value),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A saved place as returned by the entity store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    #[serde(default)]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_visited: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl Place {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Applies a confirmed patch; only the store does this, never the view
    pub fn apply(&mut self, patch: &PlacePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(latitude) = patch.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = patch.longitude {
            self.longitude = longitude;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(is_favorite) = patch.is_favorite {
            self.is_favorite = is_favorite;
        }
        if let Some(date_visited) = &patch.date_visited {
            self.date_visited = Some(date_visited.clone());
        }
        if let Some(address) = &patch.address {
            self.address = Some(address.clone());
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(rating) = patch.rating {
            self.rating = Some(rating);
        }
    }
}

/// Partial update; absent fields are left untouched remotely
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_visited: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl PlacePatch {
    pub fn favorite(is_favorite: bool) -> Self {
        Self {
            is_favorite: Some(is_favorite),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fields collected by the add-place form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlace {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: Category,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_visited: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl NewPlace {
    pub fn new(name: impl Into<String>, position: LatLng, category: Category) -> Self {
        Self {
            name: name.into(),
            latitude: position.lat,
            longitude: position.lng,
            category,
            is_favorite: false,
            date_visited: None,
            address: None,
            notes: None,
            rating: None,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    pub fn into_place(self, id: PlaceId) -> Place {
        Place {
            id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            category: self.category,
            is_favorite: self.is_favorite,
            date_visited: self.date_visited,
            address: self.address,
            notes: self.notes,
            rating: self.rating,
        }
    }
}

/// Entity sort key; a leading `-` means descending (`-date_visited`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('-') {
            Some(field) => Self {
                field: field.to_string(),
                descending: true,
            },
            None => Self {
                field: raw.to_string(),
                descending: false,
            },
        }
    }

    /// Stable sort; places missing the field go last in either direction
    pub fn sort(&self, places: &mut [Place]) {
        places.sort_by(|a, b| {
            let ordering = match self.field.as_str() {
                "date_visited" => compare_missing_last(&a.date_visited, &b.date_visited),
                "name" => Some(a.name.to_lowercase().cmp(&b.name.to_lowercase())),
                "rating" => compare_missing_last(&a.rating, &b.rating),
                _ => Some(Ordering::Equal),
            };
            match ordering {
                Some(ordering) if self.descending => ordering.reverse(),
                Some(ordering) => ordering,
                None => missing_last(a, b, &self.field),
            }
        });
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            f.write_str(&self.field)
        }
    }
}

/// `None` when exactly one side is missing, so the caller can keep it last
fn compare_missing_last<T: PartialOrd>(a: &Option<T>, b: &Option<T>) -> Option<Ordering> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.partial_cmp(b).unwrap_or(Ordering::Equal)),
        (None, None) => Some(Ordering::Equal),
        _ => None,
    }
}

fn missing_last(a: &Place, b: &Place, field: &str) -> Ordering {
    let a_missing = match field {
        "date_visited" => a.date_visited.is_none(),
        "rating" => a.rating.is_none(),
        _ => false,
    };
    let b_missing = match field {
        "date_visited" => b.date_visited.is_none(),
        "rating" => b.rating.is_none(),
        _ => false,
    };
    a_missing.cmp(&b_missing)
}
