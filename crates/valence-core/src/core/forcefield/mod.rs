pub mod energy;
pub mod params;
pub mod potentials;
