pub mod evaluate;
pub mod feedback;
pub mod rules;
