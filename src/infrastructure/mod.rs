// Infrastructure layer - External dependencies and adapters
pub mod chunked_json;
pub mod config;
pub mod directory_repository;
pub mod figure_mapper;
pub mod http_response;
pub mod mongo_repository;
pub mod palettes;
