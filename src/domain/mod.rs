// Domain layer - Datasets, tables and chart specifications
pub mod chart;
pub mod dashboard;
pub mod dataset;
pub mod table;
