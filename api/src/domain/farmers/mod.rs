pub mod farmer;
