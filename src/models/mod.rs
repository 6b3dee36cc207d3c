pub mod access_log;
pub mod employee;
pub mod position;
pub mod profile;
