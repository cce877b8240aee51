pub mod catalog;
pub mod collection;
pub mod gate;
pub mod model;
pub mod scheduler;
pub mod simulation;
pub mod store;
pub mod util;
