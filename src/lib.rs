pub mod config;
pub mod error;
pub mod extract;
pub mod io_struct;
pub mod prompt;
pub mod server;
pub mod upstream;
