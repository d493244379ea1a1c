pub mod catalog;
pub mod factory;
pub mod google;
pub mod metadata;
pub mod remote;
