pub mod files;
pub mod health;
pub mod local_files;
pub mod uploads;
