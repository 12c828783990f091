//! Domain types for ZoneLab.

pub mod bar;
pub mod side;
pub mod trade;
pub mod zone;

pub use bar::Bar;
pub use side::Side;
pub use trade::{Outcome, Trade};
pub use zone::{Zone, ZoneError};
