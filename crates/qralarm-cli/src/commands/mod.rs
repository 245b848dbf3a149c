pub mod alarm;
pub mod config;
pub mod run;
pub mod token;
pub mod verify;
