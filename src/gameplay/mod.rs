pub mod action;
pub use action::*;

pub mod engine;
pub use engine::*;

pub mod game;
pub use game::*;

pub mod seat;
pub use seat::*;

pub mod settlement;
pub use settlement::*;

pub mod showdown;
pub use showdown::*;
