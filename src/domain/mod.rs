//! Domain Layer - Core Pairs Trading Types
//!
//! Pure business types with no knowledge of the host platform:
//! paired price observations, rolling spread statistics, and the
//! three-valued position state.

pub mod position;
pub mod signal;
pub mod spread;

pub use position::SpreadPosition;
pub use signal::deviation_confidence;
pub use spread::{PairObservation, SpreadStats};
