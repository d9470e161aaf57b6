pub mod fallback;
pub mod student;
