pub mod model;

// Sentinel stored when a source provides no author, publisher or year.
pub const UNKNOWN: &str = "Desconocido";
