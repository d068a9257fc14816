mod documents;
mod dto;
mod health;
mod questions;
mod sessions;
mod shell;

pub use documents::{text_document_handler, upload_document_handler};
pub use dto::{ErrorResponse, HistoryResponse, RecordDto};
pub use health::health_handler;
pub use questions::ask_handler;
pub use sessions::{
    create_session_handler, end_session_handler, get_session_handler, history_handler,
};
pub use shell::shell_handler;
