#![doc = "The `todocat` library crate."]
#![doc = ""]
#![doc = "Contains the domain models, authentication mechanisms, routing configuration"]
#![doc = "and error handling for the todocat API. The main binary (`main.rs`) uses it"]
#![doc = "to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
