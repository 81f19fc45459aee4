pub mod seededstream;
pub mod traits;
