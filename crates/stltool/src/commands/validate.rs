use std::{fs::File, path::PathBuf};

use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use tracing::info;

use ebu_stl::StlFile;

use super::print_warnings;

#[derive(Args)]
pub struct ValidateArgs {
    /// An input STL file
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

impl ValidateArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let mut warnings = Vec::new();
        let stl = StlFile::decode(&mut f, &mut warnings)?;
        let verdict = stl.validate(&mut warnings);
        print_warnings(&warnings);

        match verdict {
            Ok(()) => {
                info!(
                    warnings = warnings.len(),
                    "{} is a valid STL file",
                    self.file.display()
                );
                Ok(())
            }
            Err(fatal) => Err(fatal.into()),
        }
    }
}
