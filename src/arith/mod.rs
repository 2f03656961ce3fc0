//! Integer arithmetic for the search: perfect-power classification and the
//! value-to-witness power table.

pub mod perfect_power;
pub mod power_table;

#[allow(unused_imports)]
pub use perfect_power::{admissible_bases, is_perfect_power, perfect_power_decomposition};
pub use power_table::{PowerTable, Witness};
