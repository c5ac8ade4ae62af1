pub mod deadline;
pub mod filter;
pub mod ticket;
pub mod time;
pub mod toast;
