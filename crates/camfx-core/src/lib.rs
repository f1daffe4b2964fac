pub mod config;
pub mod logging;

pub mod capture;
pub mod catalog;
pub mod controller;
pub mod delivery;
pub mod session;
pub mod snapshot;
pub mod upload;
