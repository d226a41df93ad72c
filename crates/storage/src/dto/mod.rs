pub mod activity;
pub mod common;
pub mod leaderboard;
pub mod prize;
pub mod ranking;
pub mod stats;
pub mod submission;
