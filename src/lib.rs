pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod submit;

#[cfg(test)]
mod test_support;
