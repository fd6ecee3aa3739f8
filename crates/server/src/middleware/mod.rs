pub mod maintenance;

pub use maintenance::maintenance_gate;
