pub mod leaderboard;
pub mod registration;
pub mod review;
pub mod similarity;
