pub mod expr;
pub mod lambda;
pub mod literal;
pub mod operator;
pub mod span;
