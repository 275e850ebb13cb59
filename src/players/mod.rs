pub mod adaptive;
pub use adaptive::*;

pub mod estimator;
pub use estimator::*;

pub mod gambler;
pub use gambler::*;

pub mod ledger;
pub use ledger::*;

pub mod params;
pub use params::*;

pub mod player;
pub use player::*;
