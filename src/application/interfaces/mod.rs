/// Bond data source interface
pub mod bonds;
