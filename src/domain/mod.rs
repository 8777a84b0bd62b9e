pub mod cart;
pub mod catalog;
pub mod payment;
pub mod ports;
pub mod state;
pub mod steps;
pub mod summary;
