pub mod motion_gate;
pub mod performance_indicator;
