pub mod curve;
pub mod department;
pub mod forecast;
pub mod production;
