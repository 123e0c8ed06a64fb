pub mod dtos;
pub mod handlers;
pub mod model;
pub mod repository;
pub mod routes;
