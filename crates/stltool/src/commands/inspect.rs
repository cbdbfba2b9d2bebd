use std::{fs::File, path::PathBuf};

use clap::Args;
use miette::{Context, IntoDiagnostic, Result};

use ebu_stl::StlFile;

use super::print_warnings;

#[derive(Args)]
pub struct InspectArgs {
    /// An input STL file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Also print every TTI block
    #[arg(long, default_value_t = false)]
    blocks: bool,
}

impl InspectArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let mut warnings = Vec::new();
        let stl = StlFile::decode(&mut f, &mut warnings)?;
        print_warnings(&warnings);

        let gsi = &stl.gsi;
        println!("CPN (Code Page Number):       {}", opt(&gsi.code_page));
        println!("DFC (Disk Format Code):       {}", opt(&gsi.disk_format));
        println!("DSC (Display Standard Code):  {}", opt(&gsi.display_standard));
        println!("CCT (Character Code Table):   {}", opt(&gsi.character_table));
        println!("LC  (Language Code):          {}", opt(&gsi.language));
        println!("OPT (Original Program Title): {}", gsi.original_program_title);
        println!("OET (Original Episode Title): {}", gsi.original_episode_title);
        println!("TN  (Translator's Name):      {}", gsi.translator_name);
        println!("CD  (Creation Date):          {}", opt(&gsi.creation_date));
        println!("RD  (Revision Date):          {}", opt(&gsi.revision_date));
        println!("RN  (Revision Number):        {}", opt(&gsi.revision_number));
        println!("TNB (Total TTI Blocks):       {}", opt(&gsi.tti_blocks));
        println!("TNS (Total Subtitles):        {}", opt(&gsi.subtitles));
        println!("TNG (Total Subtitle Groups):  {}", opt(&gsi.subtitle_groups));
        println!("MNC (Max Chars per Row):      {}", opt(&gsi.max_row_chars));
        println!("MNR (Max Rows):               {}", opt(&gsi.max_rows));
        println!("TCS (Time Code Status):       {}", opt(&gsi.timecode_status));
        println!("TCP (Start-of-Program):       {}", gsi.start_of_program);
        println!("TCF (First In-Cue):           {}", gsi.first_in_cue);
        println!("CO  (Country of Origin):      {}", gsi.country_of_origin);
        println!("PUB (Publisher):              {}", gsi.publisher);
        println!("Framerate:                    {}", opt(&gsi.framerate()));
        println!("Decoded TTI blocks:           {}", stl.tti.len());

        if self.blocks {
            for (i, tti) in stl.tti.iter().enumerate() {
                let text = match gsi.character_table {
                    Some(table) => tti
                        .text(table)
                        .unwrap_or_else(|_| format!("{:02X?}", tti.raw_text())),
                    None => format!("{:02X?}", tti.raw_text()),
                };
                println!(
                    "#{i} {} --> {} sgn:{} sn:{} ebn:{:#04X} cs:{} vp:{} jc:{} cf:{} [{}]",
                    tti.time_in,
                    tti.time_out,
                    tti.group,
                    tti.number,
                    tti.extension_block,
                    tti.cumulative,
                    tti.vertical_position,
                    tti.justification,
                    tti.comment,
                    text,
                );
            }
        }

        Ok(())
    }
}

fn opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "<blank>".to_string(),
    }
}
