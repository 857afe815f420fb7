pub mod controller;
pub mod interface;
pub mod merge;
pub mod model;
pub mod schema;
pub mod selection;

pub use controller::WorkflowController;
pub use selection::SelectionSet;
