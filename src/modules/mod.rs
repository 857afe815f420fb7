pub mod codes;
pub mod emails;
pub mod license;
