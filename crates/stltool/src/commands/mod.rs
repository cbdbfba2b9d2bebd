pub mod dump;
pub mod inspect;
pub mod validate;

use owo_colors::{OwoColorize, Stream};

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Print the contents of an STL file
    Inspect(inspect::InspectArgs),
    /// Check an STL file against the format's rules
    Validate(validate::ValidateArgs),
    /// Convert an STL file to a JSON document
    Dump(dump::DumpArgs),
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Inspect(inspect) => inspect.handle(),
            Commands::Validate(validate) => validate.handle(),
            Commands::Dump(dump) => dump.handle(),
        }
    }
}

pub(crate) fn print_warnings(warnings: &[ebu_stl::Warning]) {
    for warning in warnings {
        eprintln!(
            "{} {}",
            "warning:".if_supports_color(Stream::Stderr, |text| text.yellow()),
            warning
        );
    }
}
