pub mod colors;
pub mod formatting;
pub mod ids;
pub mod table;
pub mod validation;

pub use formatting::minutes2clock;
