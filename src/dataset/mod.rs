// Dataset module
// Labeled training tables read once at startup

mod loader;

pub use loader::{Dataset, TrainingRecord};
