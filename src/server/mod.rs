pub mod app;
pub mod error;
pub mod extract;
pub mod pagination;
mod routes;
