pub mod compile;
pub mod init;

pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
