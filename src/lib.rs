pub mod adapters;
pub mod application;
pub mod domain;
pub mod infra;


pub use application::*;
pub use domain::*;
