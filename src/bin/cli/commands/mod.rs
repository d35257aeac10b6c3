pub mod dashboard;
pub mod learn;
pub mod words;
