pub mod handlers;
pub mod session;
pub mod utils;

pub use session::SftpSession;
