pub mod appointment;
pub mod candidate;
pub mod course;
pub mod event;
pub mod job;
pub mod moderation;
pub mod resume;
pub mod user;
