mod handler;
mod model;

pub use handler::{index, reply, submit, view_feedback};
pub use model::{FeedbackStore, ReplyRequest, SubmitFeedbackRequest};
