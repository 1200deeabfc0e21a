mod init;
mod migrate;
mod promote;
mod serve;

pub use init::cmd_init;
pub use migrate::cmd_migrate;
pub use promote::cmd_promote;
pub use serve::cmd_serve;
