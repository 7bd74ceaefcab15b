use clap::Args;
use miette::{miette, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Args)]
pub struct ShowArgs {
    /// An input TLK file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Only print the string with this strref
    #[arg(short, long, value_name = "STRREF")]
    strref: Option<usize>,
}

impl ShowArgs {
    pub fn handle(&self) -> Result<()> {
        let table = super::load(&self.file)?;

        match self.strref {
            Some(strref) => {
                let string = table.get(strref).ok_or(miette!(
                    "strref {} is out of range, {} has {} strings",
                    strref,
                    self.file.display(),
                    table.len()
                ))?;
                print_string(strref, string);
            }
            None => {
                for (strref, string) in table.iter().enumerate() {
                    print_string(strref, string);
                }
            }
        }

        Ok(())
    }
}

fn print_string(strref: usize, string: &kotor_tlk::TalkString) {
    if string.sound_res_ref.is_empty() {
        println!("{}: {}", strref.blue(), string);
    } else {
        println!(
            "{} [{}]: {}",
            strref.blue(),
            string.sound_res_ref.dimmed(),
            string
        );
    }
}
