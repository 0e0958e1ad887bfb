//! Markup-aware word diff
//!
//! `antar` compares two versions of a markup fragment token by token and renders the result
//! as annotated markup, as a structured changeset, or as a pair of before/after renderings.
//!
//! - `artifacts`: tokenizer, block matcher, operation builder and renderers
//! - `areas`: the document adapter and the command-line session
//! - `commands`: the operations exposed by the command-line front end
//!
//! ```
//! use antar::{DiffOptions, DiffOutput};
//!
//! let output = antar::diff("a b c", "a d c", &DiffOptions::default()).unwrap();
//! assert_eq!(
//!     output,
//!     DiffOutput::Markup(
//!         r#"a <del class="diffmod">b</del><ins class="diffmod">d</ins> c"#.to_string()
//!     )
//! );
//! ```

#[macro_use]
mod macros;

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use artifacts::diff::engine::{Comparison, DiffEngine, DiffOptions, DiffOutput, SplitMarkup};
pub use artifacts::render::WrapperClasses;

pub const OUTPUT_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "html" => "inline",
    "json" => "changeset",
    "side-by-side" => "split",
    "sbs" => "split",
    "ansi" => "terminal",
};

/// How the operations of a diff are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputMode {
    /// Markup with `ins`/`del` wrappers around the edits
    #[default]
    Inline,
    /// Unchanged text plus change records and the score table
    Changeset,
    /// The old document with deletions marked and the new one with insertions marked
    Split,
    /// Colored preview for a terminal
    Terminal,
}

impl OutputMode {
    pub fn try_parse(name: &str) -> anyhow::Result<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        let resolved = *OUTPUT_ALIASES.get(lowered.as_str()).unwrap_or(&lowered.as_str());

        match resolved {
            "inline" => Ok(OutputMode::Inline),
            "changeset" => Ok(OutputMode::Changeset),
            "split" => Ok(OutputMode::Split),
            "terminal" => Ok(OutputMode::Terminal),
            _ => anyhow::bail!(
                "unknown output mode '{}', expected one of: inline, changeset, split, terminal",
                name
            ),
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputMode::Inline => "inline",
            OutputMode::Changeset => "changeset",
            OutputMode::Split => "split",
            OutputMode::Terminal => "terminal",
        };
        write!(f, "{name}")
    }
}

/// Diff two markup strings in one call.
pub fn diff(old_markup: &str, new_markup: &str, options: &DiffOptions) -> anyhow::Result<DiffOutput> {
    let engine = DiffEngine::new(options.clone())?;
    Ok(engine.diff(old_markup, new_markup))
}
