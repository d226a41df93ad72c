mod activity;
mod point_record;
mod prize;
mod registration;
mod submission;

pub use activity::Activity;
pub use point_record::PointRecord;
pub use prize::Prize;
pub use registration::PrizeRegistration;
pub use submission::{Submission, SubmissionStatus};
