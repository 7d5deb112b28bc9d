use crate::model::{Category, Place};
use std::fmt;

/// Category control value; `All` disables category filtering
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Every value the category control offers, in display order
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::KNOWN.iter().cloned().map(CategoryFilter::Only))
            .collect()
    }

    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => f.write_str(category.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub favorites_only: bool,
}

impl FilterState {
    pub fn new(category: CategoryFilter, favorites_only: bool) -> Self {
        Self {
            category,
            favorites_only,
        }
    }

    pub fn accepts(&self, place: &Place) -> bool {
        self.category.matches(&place.category) && (!self.favorites_only || place.is_favorite)
    }

    /// The places passing the filter, in list order
    pub fn visible_places<'a>(&self, places: &'a [Place]) -> Vec<&'a Place> {
        places.iter().filter(|p| self.accepts(p)).collect()
    }

    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlaceId;

    fn place(id: &str, category: Category, is_favorite: bool) -> Place {
        Place {
            id: PlaceId::new(id),
            name: format!("place {}", id),
            latitude: 40.7,
            longitude: -74.0,
            category,
            is_favorite,
            date_visited: None,
            address: None,
            notes: None,
            rating: None,
        }
    }

    fn sample() -> Vec<Place> {
        vec![
            place("1", Category::Bar, false),
            place("2", Category::Cafe, true),
            place("3", Category::Bar, true),
            place("4", Category::Other("museum".to_string()), false),
            place("5", Category::Restaurant, false),
        ]
    }

    fn ids(places: &[&Place]) -> Vec<String> {
        places.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_favorites_only_across_all_categories() {
        let places = vec![
            place("1", Category::Bar, false),
            place("2", Category::Cafe, true),
        ];
        let filter = FilterState::new(CategoryFilter::All, true);

        assert_eq!(ids(&filter.visible_places(&places)), vec!["2"]);
    }

    #[test]
    fn test_default_filter_shows_everything_in_order() {
        let places = sample();
        let visible = FilterState::default().visible_places(&places);
        assert_eq!(ids(&visible), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_category_and_favorite_combine() {
        let places = sample();
        let filter = FilterState::new(CategoryFilter::Only(Category::Bar), true);
        assert_eq!(ids(&filter.visible_places(&places)), vec!["3"]);

        let bars = FilterState::new(CategoryFilter::Only(Category::Bar), false);
        assert_eq!(ids(&bars.visible_places(&places)), vec!["1", "3"]);
    }

    #[test]
    fn test_filter_is_exact_and_bounded_for_every_combination() {
        let places = sample();
        for category in CategoryFilter::options() {
            for favorites_only in [false, true] {
                let filter = FilterState::new(category.clone(), favorites_only);
                let visible = filter.visible_places(&places);

                assert!(visible.len() <= places.len());
                let expected: Vec<&Place> = places
                    .iter()
                    .filter(|p| {
                        (category == CategoryFilter::All
                            || CategoryFilter::Only(p.category.clone()) == category)
                            && (!favorites_only || p.is_favorite)
                    })
                    .collect();
                assert_eq!(visible, expected);

                // same inputs, same ordered output
                assert_eq!(filter.visible_places(&places), visible);
            }
        }
    }

    #[test]
    fn test_options_start_with_all() {
        let options = CategoryFilter::options();
        assert_eq!(options.len(), 6);
        assert_eq!(options[0], CategoryFilter::All);
        assert_eq!(options[4].to_string(), "Cafe");
    }
}
