mod file;
mod store;
mod tokens;
mod user_record;

pub use file::UserRecordFile;
pub use store::{Change, RecordBackend, RecordStore};
pub use tokens::{AccessToken, UserId, UserToken};
pub use user_record::UserRecord;
