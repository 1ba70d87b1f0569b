pub mod add;
pub mod config;
pub mod contrast;
pub mod delete;
pub mod list;
pub mod open;
pub mod reschedule;
