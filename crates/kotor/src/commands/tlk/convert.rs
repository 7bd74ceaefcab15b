use clap::{Args, ValueEnum};
use kotor_tlk::{
    serde::{from_json_reader, to_json_writer},
    write::{FlagPolicy, TlkWriterOptions},
    xml::{from_xml, to_xml},
    TlkWriter,
};
use miette::{miette, Context, IntoDiagnostic, Result};
use std::{
    ffi::OsStr,
    fs::File,
    io::{BufReader, Cursor},
    path::{Path, PathBuf},
};
use tracing::info;

/// Structured text format of an exported talk table
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }

    fn from_path(path: &Path) -> Option<Format> {
        match path.extension().and_then(OsStr::to_str) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Format::Json),
            Some(ext) if ext.eq_ignore_ascii_case("xml") => Some(Format::Xml),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Flags {
    /// Mark every value as present, like the game tools do
    #[default]
    Always,
    /// Only mark the values an entry has
    Content,
}

impl From<Flags> for FlagPolicy {
    fn from(value: Flags) -> Self {
        match value {
            Flags::Always => FlagPolicy::Always,
            Flags::Content => FlagPolicy::FromContent,
        }
    }
}

#[derive(Args)]
pub struct ExportArgs {
    /// An input TLK file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExportArgs {
    pub fn handle(&self, format: Format) -> Result<()> {
        let table = super::load(&self.file)?;

        let name = self
            .file
            .file_name()
            .ok_or(miette!("{} is not a file", self.file.display()))?;
        let mut name = name.to_os_string();
        name.push(".");
        name.push(format.extension());

        let p = self.directory.join(name);
        info!("writing {} strings to {}", table.len(), p.display());

        let content = match format {
            Format::Json => {
                let mut content = Vec::new();
                to_json_writer(&table, &mut content)?;
                content
            }
            Format::Xml => to_xml(&table)?.into_bytes(),
        };

        std::fs::create_dir_all(&self.directory)
            .into_diagnostic()
            .context(format!("creating {}", self.directory.display()))?;
        super::persist(&p, self.overwrite, &content)
    }
}

#[derive(Args)]
pub struct ImportArgs {
    /// An input JSON or XML file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Language id stored in the TLK header
    #[arg(long, default_value_t = 0)]
    language: u32,

    /// How the presence flags of each entry are written
    #[arg(long, value_enum, default_value_t = Flags::Always)]
    flags: Flags,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

/// Name of the TLK file produced from an exported document
pub fn tlk_file_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let has_extension = Path::new(stem)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tlk"));

    if has_extension {
        Some(stem.to_owned())
    } else {
        Some(format!("{}.tlk", stem))
    }
}

impl ImportArgs {
    pub fn handle(&self) -> Result<()> {
        let format = Format::from_path(&self.file).ok_or(miette!(
            "unable to tell the format of {}, expected a .json or .xml file",
            self.file.display()
        ))?;

        let table = match format {
            Format::Json => {
                let f = File::open(&self.file)
                    .into_diagnostic()
                    .context(format!("path: {}", &self.file.display()))?;
                from_json_reader(BufReader::new(f))
            }
            Format::Xml => {
                let content = std::fs::read_to_string(&self.file)
                    .into_diagnostic()
                    .context(format!("path: {}", &self.file.display()))?;
                from_xml(&content)
            }
        }
        .context(format!("parsing {}", self.file.display()))?;

        let name = tlk_file_name(&self.file)
            .ok_or(miette!("unable to convert {} to a string", self.file.display()))?;
        let p = self.directory.join(name);
        info!("writing {} strings to {}", table.len(), p.display());

        let content = TlkWriter::new(
            Cursor::new(Vec::new()),
            TlkWriterOptions::builder()
                .language_id(self.language)
                .flags(self.flags.into())
                .build(),
        )
        .save(&table)
        .context("finalizing tlk file")?
        .into_inner();

        std::fs::create_dir_all(&self.directory)
            .into_diagnostic()
            .context(format!("creating {}", self.directory.display()))?;
        super::persist(&p, self.overwrite, &content)
    }
}
