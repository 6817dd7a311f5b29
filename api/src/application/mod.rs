pub mod access;
pub mod dto;
pub mod error;
pub mod integrity;
pub mod ports;
pub mod services;
pub mod use_cases;

#[cfg(test)]
pub mod testing;
