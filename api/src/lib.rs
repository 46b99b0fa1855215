// Library exports for testing and the binary

pub mod app;
pub mod cookies;
pub mod dto;
pub mod middleware;
pub mod routes;
pub mod state;
