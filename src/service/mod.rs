pub mod init;
pub mod medicines;
pub mod session;
