pub mod palette;
pub mod period;
