pub mod date;
pub mod sqlite;
