use kotor_tlk::{TalkTable, TlkReader};
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, io::Write, path::Path};
use tracing::warn;

pub mod convert;
pub mod diff;
pub mod show;

#[derive(clap::Subcommand)]
pub enum TlkCommands {
    /// Convert a TLK file to JSON
    ToJson(convert::ExportArgs),
    /// Convert a TLK file to XML
    ToXml(convert::ExportArgs),
    /// Convert a JSON or XML file to TLK
    ToTlk(convert::ImportArgs),
    /// Print the strings of a TLK file
    Show(show::ShowArgs),
    /// Compare two TLK files
    Diff(diff::DiffArgs),
}

impl TlkCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            TlkCommands::ToJson(export) => export.handle(convert::Format::Json),
            TlkCommands::ToXml(export) => export.handle(convert::Format::Xml),
            TlkCommands::ToTlk(import) => import.handle(),
            TlkCommands::Show(show) => show.handle(),
            TlkCommands::Diff(diff) => diff.handle(),
        }
    }
}

pub(crate) fn load(path: &Path) -> Result<TalkTable> {
    let f = File::open(path)
        .into_diagnostic()
        .context(format!("path: {}", path.display()))?;

    TlkReader::new(f)
        .load()
        .context(format!("reading {}", path.display()))
}

fn create(path: &Path, overwrite: bool) -> Result<File> {
    if !overwrite {
        File::create_new(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))
    } else {
        File::create(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))
    }
}

/// Write an already serialized file, removing it again if the write fails.
pub(crate) fn persist(path: &Path, overwrite: bool, content: &[u8]) -> Result<()> {
    let mut f = create(path, overwrite)?;

    if let Err(err) = f.write_all(content).and_then(|_| f.sync_all()) {
        drop(f);
        if let Err(remove) = std::fs::remove_file(path) {
            warn!("unable to remove {}: {}", path.display(), remove);
        }
        return Err(err)
            .into_diagnostic()
            .context(format!("writing {}", path.display()));
    }

    Ok(())
}
