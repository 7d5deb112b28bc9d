use crate::core::constants::MAX_SEARCH_RESULTS;
use crate::model::Place;

/// Case-insensitive substring search over name, address and category
///
/// Searches the full list, not the filtered one, so a place hidden by the
/// current filter can still be found. Blank queries match nothing.
pub fn search_places<'a>(query: &str, places: &'a [Place]) -> Vec<&'a Place> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    places
        .iter()
        .filter(|place| {
            place.name.to_lowercase().contains(&needle)
                || place.category.as_str().to_lowercase().contains(&needle)
                || place
                    .address
                    .as_deref()
                    .map(|address| address.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .take(MAX_SEARCH_RESULTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, PlaceId};

    fn place(id: &str, name: &str, address: Option<&str>, category: Category) -> Place {
        Place {
            id: PlaceId::new(id),
            name: name.to_string(),
            latitude: 40.7,
            longitude: -74.0,
            category,
            is_favorite: false,
            date_visited: None,
            address: address.map(str::to_string),
            notes: None,
            rating: None,
        }
    }

    #[test]
    fn test_matches_name_address_and_category() {
        let places = vec![
            place("1", "Katz's Delicatessen", Some("205 E Houston St"), Category::Restaurant),
            place("2", "Dead Rabbit", Some("30 Water St"), Category::Bar),
            place("3", "Stumptown", None, Category::Cafe),
        ];

        assert_eq!(search_places("katz", &places)[0].id, PlaceId::new("1"));
        assert_eq!(search_places("water st", &places)[0].id, PlaceId::new("2"));
        assert_eq!(search_places("CAFE", &places)[0].id, PlaceId::new("3"));
        assert!(search_places("zzz", &places).is_empty());
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let places = vec![place("1", "Anything", None, Category::Bar)];
        assert!(search_places("   ", &places).is_empty());
    }

    #[test]
    fn test_results_are_capped() {
        let places: Vec<Place> = (0..20)
            .map(|i| place(&i.to_string(), &format!("Bar {}", i), None, Category::Bar))
            .collect();
        let results = search_places("bar", &places);

        assert_eq!(results.len(), MAX_SEARCH_RESULTS);
        assert_eq!(results[0].id, PlaceId::new("0"));
    }
}
