pub mod engine;
pub mod rpc;
pub mod xr;
