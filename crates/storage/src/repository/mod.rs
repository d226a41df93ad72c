pub mod activity;
pub mod prize;
pub mod ranking;
pub mod registration;
pub mod stats;
pub mod submission;
