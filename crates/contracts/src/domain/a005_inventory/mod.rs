pub mod aggregate;
pub mod log;
