//! Side panels: filter bar, search, add-place form and the detail card.

use crate::core::geo::LatLng;
use crate::model::{Category, NewPlace, Place, PlaceId, PlacePatch};
use crate::view::{CategoryFilter, MapView};
use crate::{MapError, Result};
use egui::{RichText, Ui};

/// Requests the app must forward to the canvas or the store worker
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    Recenter,
    UpdatePlace(PlaceId, PlacePatch),
    CreatePlace(NewPlace),
}

pub fn filter_bar(ui: &mut Ui, view: &mut MapView, actions: &mut Vec<PanelAction>) {
    ui.horizontal_wrapped(|ui| {
        egui::ComboBox::from_id_source("category_filter")
            .selected_text(view.filter.category.to_string())
            .show_ui(ui, |ui| {
                for option in CategoryFilter::options() {
                    let label = option.to_string();
                    ui.selectable_value(&mut view.filter.category, option, label);
                }
            });
        ui.checkbox(&mut view.filter.favorites_only, "Favorites only");
        if ui.button("Recenter").clicked() {
            actions.push(PanelAction::Recenter);
        }
        // the spreadsheet view lives outside this app
        ui.add_enabled(false, egui::Link::new("Spreadsheet"));
    });
    ui.label(format!(
        "{} of {} places",
        view.visible_places().len(),
        view.places().len()
    ));
}

pub fn search_box(ui: &mut Ui, view: &mut MapView) {
    ui.add(egui::TextEdit::singleline(&mut view.search_query).hint_text("Search places…"));

    let mut chosen: Option<Place> = None;
    for place in view.search_results() {
        let text = format!("{}  ·  {}", place.name, place.category.label());
        if ui.selectable_label(false, text).clicked() {
            chosen = Some(place.clone());
        }
    }
    if let Some(place) = chosen {
        view.on_search_select(&place);
    }
}

/// Text fields of the add-place form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddPlaceForm {
    pub name: String,
    pub category: Category,
    pub latitude: String,
    pub longitude: String,
    pub address: String,
    pub error: Option<String>,
}

impl AddPlaceForm {
    pub fn new() -> Self {
        Self {
            category: Category::Restaurant,
            ..Self::default()
        }
    }

    pub fn to_new_place(&self) -> Result<NewPlace> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(MapError::Validation("name is required".to_string()));
        }
        let parse = |raw: &str, field: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| MapError::InvalidCoordinates(format!("{} '{}' is not a number", field, raw)))
        };
        let position = LatLng::new(parse(&self.latitude, "latitude")?, parse(&self.longitude, "longitude")?);
        if !position.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "({}, {}) is outside the map",
                position.lat, position.lng
            )));
        }

        let mut place = NewPlace::new(name, position, self.category.clone());
        let address = self.address.trim();
        if !address.is_empty() {
            place.address = Some(address.to_string());
        }
        Ok(place)
    }

    pub fn show(&mut self, ui: &mut Ui, actions: &mut Vec<PanelAction>) {
        egui::Grid::new("add_place_form").num_columns(2).show(ui, |ui| {
            ui.label("Name");
            ui.text_edit_singleline(&mut self.name);
            ui.end_row();

            ui.label("Category");
            egui::ComboBox::from_id_source("add_place_category")
                .selected_text(self.category.label())
                .show_ui(ui, |ui| {
                    for category in Category::KNOWN {
                        let label = category.label().to_string();
                        ui.selectable_value(&mut self.category, category, label);
                    }
                });
            ui.end_row();

            ui.label("Latitude");
            ui.text_edit_singleline(&mut self.latitude);
            ui.end_row();

            ui.label("Longitude");
            ui.text_edit_singleline(&mut self.longitude);
            ui.end_row();

            ui.label("Address");
            ui.text_edit_singleline(&mut self.address);
            ui.end_row();
        });

        if ui.button("Add place").clicked() {
            match self.to_new_place() {
                Ok(place) => {
                    actions.push(PanelAction::CreatePlace(place));
                    *self = Self::new();
                }
                Err(e) => self.error = Some(e.to_string()),
            }
        }
        if let Some(error) = &self.error {
            ui.colored_label(egui::Color32::from_rgb(185, 28, 28), error);
        }
    }
}

/// Card for the selected place
pub fn detail_card(ui: &mut Ui, view: &mut MapView, actions: &mut Vec<PanelAction>) {
    let Some(place) = view.selected().cloned() else {
        return;
    };

    let mut close = false;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.heading(&place.name);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                close = ui.button("✕").clicked();
            });
        });
        ui.label(RichText::new(place.category.label()).italics());
        if let Some(address) = &place.address {
            ui.label(address);
        }
        if let Some(date) = &place.date_visited {
            ui.label(format!("Visited {}", date));
        }
        if let Some(rating) = place.rating {
            ui.label(format!("Rating {:.1} / 5", rating));
        }
        if let Some(notes) = &place.notes {
            ui.separator();
            ui.label(notes);
        }

        let star = if place.is_favorite { "★ Favorite" } else { "☆ Favorite" };
        if ui.button(star).clicked() {
            if let Some((id, patch)) = view.toggle_favorite(&place.id) {
                actions.push(PanelAction::UpdatePlace(id, patch));
            }
        }
    });

    if close {
        view.close_detail();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, lat: &str, lng: &str) -> AddPlaceForm {
        AddPlaceForm {
            name: name.to_string(),
            latitude: lat.to_string(),
            longitude: lng.to_string(),
            ..AddPlaceForm::new()
        }
    }

    #[test]
    fn test_valid_form_builds_new_place() {
        let mut input = form("  Russ & Daughters ", "40.7223", "-73.9882");
        input.address = "179 E Houston St".to_string();
        let place = input.to_new_place().unwrap();

        assert_eq!(place.name, "Russ & Daughters");
        assert_eq!(place.category, Category::Restaurant);
        assert_eq!(place.position(), LatLng::new(40.7223, -73.9882));
        assert_eq!(place.address.as_deref(), Some("179 E Houston St"));
    }

    #[test]
    fn test_invalid_forms_are_rejected() {
        assert!(matches!(form("", "1", "1").to_new_place(), Err(MapError::Validation(_))));
        assert!(matches!(
            form("x", "north", "1").to_new_place(),
            Err(MapError::InvalidCoordinates(_))
        ));
        assert!(matches!(
            form("x", "91", "0").to_new_place(),
            Err(MapError::InvalidCoordinates(_))
        ));
    }
}
