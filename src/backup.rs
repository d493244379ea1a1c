pub mod domain;
pub mod factory;
pub mod reconciler;
pub mod snapshot;
