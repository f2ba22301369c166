pub mod configure;
pub mod health;
pub mod manifest;
pub mod process;
