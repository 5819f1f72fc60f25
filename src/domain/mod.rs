pub mod models;
pub mod evaluator;
pub mod validator;
pub mod errors;

pub use models::*;
pub use evaluator::*;
pub use validator::*;
pub use errors::*;
