pub mod logger;
pub mod resolver;
pub mod validation;
