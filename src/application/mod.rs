// Application layer - Use cases and collaborator contracts
pub mod chart_binding;
pub mod chart_profiles;
pub mod dashboard_service;
pub mod dataset_repository;
pub mod normalizer;
pub mod presentation_surface;
pub mod streaming_service;
