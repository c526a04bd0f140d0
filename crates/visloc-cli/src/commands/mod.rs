pub mod location;
pub mod queue;
