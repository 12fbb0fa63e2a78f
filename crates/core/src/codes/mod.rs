//! Integer code vocabularies shared by every stage of the update: FM40 fuel
//! model codes and DIST disturbance codes.

pub mod dist;
pub mod fuel;

pub use dist::{BurnSeverity, DistCode, Severity, TimeSinceFire, NO_DISTURBANCE};
pub use fuel::{FuelClass, FuelCode};
