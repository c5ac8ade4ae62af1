pub(crate) mod board;
pub(crate) mod config;
pub(crate) mod deadline;
pub(crate) mod init;
pub(crate) mod list;
pub(crate) mod raise;
pub(crate) mod resolve;
