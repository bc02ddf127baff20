//! Planning: project description in, blueprint out

mod generator;

pub use generator::PlanGenerator;
