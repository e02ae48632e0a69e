mod dispatcher;
mod event;

pub use dispatcher::{Acknowledgement, WebhookDispatcher};
pub use event::{IncomeVerificationStatus, ItemEvent, WebhookEvent, WebhookPayload};
