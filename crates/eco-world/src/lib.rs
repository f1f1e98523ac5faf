//! Ecosystem simulation engine.
//!
//! A bounded field of animals and plants that age, feed, breed, catch
//! disease and weather the elements one discrete step at a time.

pub mod behavior;
pub mod disease;
pub mod field;
pub mod organism;
pub mod simulation;
pub mod view;
pub mod weather;
pub mod world;

pub use behavior::TimeOfDay;
pub use field::{Census, Field};
pub use organism::{Animal, Plant};
pub use simulation::Simulator;
pub use view::{LogView, NullView, View};
pub use world::{DeathCause, World};
