pub mod prices;
pub mod rolling;
pub mod stats;
pub mod util;
