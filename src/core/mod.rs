pub mod tracker;

pub use tracker::Tracker;
