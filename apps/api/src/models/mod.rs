pub mod application;
pub mod job;
pub mod notification;
pub mod student;
pub mod teacher;
