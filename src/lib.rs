pub mod cli;
pub mod constants;
pub mod errors;
pub mod registry;
pub mod services;
pub mod utils;

pub use errors::OptionError;
pub use registry::{OptionDescriptor, OptionValue, Registry};
pub use services::resolver::{resolve, Outcome, Resolution, Resolver};
pub use services::validation::RawValue;
