pub mod baseline;
pub mod classes;
