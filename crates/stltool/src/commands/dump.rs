use std::{fs::File, path::PathBuf};

use clap::Args;
use miette::{Context, IntoDiagnostic, Result};

use ebu_stl::StlFile;

use super::print_warnings;

#[derive(Args)]
pub struct DumpArgs {
    /// An input STL file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Write the document to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl DumpArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let mut warnings = Vec::new();
        let stl = StlFile::decode(&mut f, &mut warnings)?;
        print_warnings(&warnings);

        match &self.output {
            Some(path) => {
                let out = File::create(path)
                    .into_diagnostic()
                    .context(format!("creating {}", path.display()))?;
                serde_json::to_writer_pretty(out, &stl).into_diagnostic()?;
            }
            None => {
                serde_json::to_writer_pretty(std::io::stdout().lock(), &stl).into_diagnostic()?;
                println!();
            }
        }

        Ok(())
    }
}
