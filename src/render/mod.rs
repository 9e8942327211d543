pub mod ratios;
pub mod table;
pub mod valuation;

pub use ratios::*;
pub use table::*;
pub use valuation::*;
