pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod repository;
pub mod routes;
pub mod token_service;
