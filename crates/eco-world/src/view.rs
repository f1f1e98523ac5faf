//! Observers of a running simulation.

use crate::field::Field;
use tracing::info;

/// Receives status after every step and decides whether a run goes on.
pub trait View {
    fn show_status(&mut self, step: u64, field: &Field);

    /// Whether the simulation is worth continuing.
    fn is_viable(&self, field: &Field) -> bool {
        field.census().is_viable()
    }

    fn set_info_text(&mut self, text: &str);
}

/// Headless view: ignores status and never stops a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl View for NullView {
    fn show_status(&mut self, _step: u64, _field: &Field) {}

    fn is_viable(&self, _field: &Field) -> bool {
        true
    }

    fn set_info_text(&mut self, _text: &str) {}
}

/// Reports status as tracing events. A run stops once a single kind is left.
#[derive(Debug, Clone, Default)]
pub struct LogView {
    info_text: String,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info_text(&self) -> &str {
        &self.info_text
    }
}

impl View for LogView {
    fn show_status(&mut self, step: u64, field: &Field) {
        let census = field.census();
        info!(
            event = "status",
            step = step,
            population = census.total(),
            census = %census,
            info = %self.info_text,
            "Step {}", step
        );
    }

    fn set_info_text(&mut self, text: &str) {
        self.info_text = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::{AnimalId, Location, Occupant, PlantId, Species};
    use slotmap::KeyData;

    fn populated_field() -> Field {
        let mut field = Field::new(3, 3);
        field.place(
            Occupant::Animal {
                id: AnimalId::from(KeyData::from_ffi(0)),
                species: Species::Cow,
            },
            Location::new(0, 0),
        );
        field
    }

    #[test]
    fn test_null_view_always_viable() {
        let view = NullView;
        assert!(view.is_viable(&Field::new(2, 2)));
        assert!(view.is_viable(&populated_field()));
    }

    #[test]
    fn test_log_view_needs_two_kinds() {
        let mut view = LogView::new();
        let mut field = populated_field();
        assert!(!view.is_viable(&field));

        field.place(
            Occupant::Plant {
                id: PlantId::from(KeyData::from_ffi(0)),
            },
            Location::new(2, 2),
        );
        assert!(view.is_viable(&field));

        view.set_info_text("Time: day   Weather: sunny");
        view.show_status(3, &field);
        assert_eq!(view.info_text(), "Time: day   Weather: sunny");
    }
}
