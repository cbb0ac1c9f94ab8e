pub mod answers;
pub mod prompt;
pub mod result;
