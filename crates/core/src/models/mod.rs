pub mod alert;
pub mod asset;
pub mod batch;
pub mod holding;
pub mod series;
pub mod snapshot;
pub mod summary;
pub mod transaction;
