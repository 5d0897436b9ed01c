//! Pure formatting of TfL API responses into chat-ready HTML text.

pub mod arrivals;
pub mod status;
