pub mod breakdown;
pub mod load;
