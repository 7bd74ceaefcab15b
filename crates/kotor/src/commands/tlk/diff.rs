use clap::{Args, ValueEnum};
use itertools::{EitherOrBoth, Itertools};
use kotor_tlk::TalkString;
use miette::Result;
use owo_colors::OwoColorize;
use similar::{ChangeTag, TextDiff};
use std::{fmt::Display, path::PathBuf};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Mode {
    #[default]
    Semantic,
    Full,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Change {
    Added(usize, TalkString),
    Removed(usize, TalkString),
    Modified(usize, TalkString, TalkString, Vec<String>),
}

fn describe(string: &TalkString) -> String {
    if string.sound_res_ref.is_empty() {
        string.text.clone()
    } else {
        format!("{} [{}]", string.text, string.sound_res_ref)
    }
}

impl Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Change::Added(strref, v) => {
                writeln!(f, "✅ {}: {}", strref, describe(v).green())
            }
            Change::Removed(strref, v) => {
                writeln!(f, "❌ {}: {}", strref, describe(v).red())
            }
            Change::Modified(strref, old, new, context) => {
                writeln!(f, "🔃 {}", strref.blue())?;
                if old.sound_res_ref != new.sound_res_ref {
                    writeln!(
                        f,
                        "  * sound: {} vs {}",
                        old.sound_res_ref.red(),
                        new.sound_res_ref.green()
                    )?;
                }
                if old.text != new.text && context.is_empty() {
                    writeln!(f, "  * text: {} vs {}", old.text.red(), new.text.green())?;
                }
                for line in context {
                    writeln!(f, "   {}", line)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Args)]
pub struct DiffArgs {
    /// An input TLK file
    #[arg(short, long, value_name = "FILE")]
    left: PathBuf,

    /// An input TLK file
    #[arg(short, long, value_name = "FILE")]
    right: PathBuf,

    /// Comparison mode
    #[arg(short, long, value_enum, default_value_t=Mode::Semantic)]
    mode: Mode,
}

fn inline_changes(old: &str, new: &str) -> Vec<String> {
    let diff = TextDiff::from_lines(old, new);

    let mut comparison = Vec::new();
    for op in diff.ops().iter() {
        for change in diff.iter_inline_changes(op) {
            let mut context = String::new();
            for (emphasized, value) in change.iter_strings_lossy() {
                if emphasized {
                    if change.tag() == ChangeTag::Insert {
                        context.push_str(&format!("{}", value.green().underline()));
                    } else {
                        context.push_str(&format!("{}", value.red().underline()));
                    }
                } else {
                    context.push_str(&format!("{}", value.dimmed()));
                }
            }
            comparison.push(context.trim_end().to_string());
        }
    }
    comparison
}

/// Compare two tables strref by strref
pub fn compare<'a>(
    left: impl IntoIterator<Item = &'a TalkString>,
    right: impl IntoIterator<Item = &'a TalkString>,
    full: bool,
) -> Vec<Change> {
    left.into_iter()
        .zip_longest(right)
        .enumerate()
        .filter_map(|(strref, pair)| match pair {
            EitherOrBoth::Left(old) => Some(Change::Removed(strref, old.clone())),
            EitherOrBoth::Right(new) => Some(Change::Added(strref, new.clone())),
            EitherOrBoth::Both(old, new) if old != new => {
                let context = if full && old.text != new.text {
                    inline_changes(&old.text, &new.text)
                } else {
                    vec![]
                };
                Some(Change::Modified(strref, old.clone(), new.clone(), context))
            }
            EitherOrBoth::Both(_, _) => None,
        })
        .collect()
}

impl DiffArgs {
    pub fn handle(&self) -> Result<()> {
        let left = super::load(&self.left)?;
        let right = super::load(&self.right)?;

        if left.language_id() != right.language_id() {
            println!(
                "* language: {} vs {}",
                left.language_id().red(),
                right.language_id().green()
            );
        }

        let changes = compare(&left, &right, self.mode == Mode::Full);
        for change in &changes {
            print!("{}", change);
        }

        println!(
            "{} added, {} removed, {} modified",
            changes.iter().filter(|c| matches!(c, Change::Added(..))).count(),
            changes.iter().filter(|c| matches!(c, Change::Removed(..))).count(),
            changes.iter().filter(|c| matches!(c, Change::Modified(..))).count(),
        );

        Ok(())
    }
}
