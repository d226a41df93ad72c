pub mod activities;
pub mod prizes;
pub mod rankings;
pub mod stats;
pub mod submissions;
