/// Tabular temporal-difference control
pub mod tabular;
