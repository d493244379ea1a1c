pub mod backup;
pub mod books;
pub mod catalog;
pub mod core;
pub mod gateway;
pub mod utils;
