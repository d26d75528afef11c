pub mod config;
pub mod hook;
pub mod renovate;
pub mod uninstall;
