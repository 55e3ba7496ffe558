//! Filter stages module
//!
//! The darken, energy-efficient color mapping and adaptive gamma stages, and
//! the chain that runs them in sequence.

mod chain;
mod darken;
mod eecm;
mod gamma_adaptive;
mod stage;

pub use chain::{ChainReport, FilterChain};
pub use darken::DarkenStage;
pub use eecm::EecmStage;
pub use gamma_adaptive::GammaAdaptiveStage;
pub use stage::FilterStage;
