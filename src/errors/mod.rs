mod cli_error;
mod option_error;

pub use cli_error::CliError;
pub use option_error::OptionError;
