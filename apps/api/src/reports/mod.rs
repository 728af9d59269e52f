//! Placement reporting: dashboards for both roles and the aggregate tables
//! the placement cell exports at the end of a drive.

pub mod handlers;
pub mod shaping;
