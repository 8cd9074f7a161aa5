pub mod rasim;

pub use rasim::Rasim;
