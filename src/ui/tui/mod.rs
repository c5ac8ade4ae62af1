mod input;
mod layout;
mod model;
mod presentation;
mod render;

pub use input::{handle_input, parse_input, text_edit_request, InputCommand};
pub use model::{BoardModel, DeadlineDialog, Modal, RaiseField, RaiseForm};
pub use render::TerminalUi;
