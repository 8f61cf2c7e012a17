pub mod ascend;
pub mod server;
