pub mod element;
pub mod molecule;
