pub mod catalog;
pub mod client;
pub mod configuration;
pub mod dashboard;
pub mod domain;
pub mod harvests;
pub mod routes;
pub mod session;
pub mod startup;
pub mod views;
