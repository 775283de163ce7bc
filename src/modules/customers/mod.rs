pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{Customer, CustomerInput};
pub use repositories::{CustomerRepository, SqliteCustomerRepository};
