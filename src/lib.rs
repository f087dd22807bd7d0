pub mod config;
pub mod error;
pub mod server;
pub mod storage;

pub use server::Server;
pub use storage::FileStore;
