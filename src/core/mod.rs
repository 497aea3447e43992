pub mod api;
pub mod device;
pub mod devices;
pub mod filter;
pub mod transport;
