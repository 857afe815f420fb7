pub mod model;
pub mod store;

pub use model::LicenseState;
pub use store::{FileLicenseStore, LicenseStore, MemoryLicenseStore};
