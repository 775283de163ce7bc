pub mod customer;

pub use customer::{Customer, CustomerInput};
