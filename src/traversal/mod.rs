pub mod controller;
pub mod path_selection;
pub mod state;

pub use controller::TraversalController;
pub use state::*;
