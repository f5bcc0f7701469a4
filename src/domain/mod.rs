pub mod language;
pub mod ticket;
