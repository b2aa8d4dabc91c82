pub mod forcefield;
pub mod models;
pub mod symmetry;
pub mod topology;
pub mod typing;
pub mod utils;
