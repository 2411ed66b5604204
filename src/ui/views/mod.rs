pub mod completion;
pub mod courses;
pub mod exercise;
pub mod lesson;
pub mod lessons;
pub mod login;
pub mod review;
