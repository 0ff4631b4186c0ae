pub mod analysis;
pub mod ids;
pub mod pitch;
pub mod qa;
pub mod report;
