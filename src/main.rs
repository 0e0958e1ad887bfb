use anyhow::Result;
use antar::OutputMode;
use antar::areas::scorer::TextLengthScorer;
use antar::areas::session::Session;
use antar::artifacts::core::PagedOutput;
use antar::{DiffEngine, DiffOptions, WrapperClasses};
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "antar",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A markup-aware word diff",
    long_about = "Compares two versions of an HTML document word by word, keeping tags intact. \
    The result can be rendered as annotated markup, as a JSON changeset, or as a pair of \
    before/after documents.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "diff",
        about = "Show the changes between two documents",
        long_about = "This command diffs the bodies of two documents and prints the result \
        in the selected output mode."
    )]
    Diff {
        #[arg(index = 1, help = "The old version of the document")]
        old: PathBuf,
        #[arg(index = 2, help = "The new version of the document")]
        new: PathBuf,
        #[arg(
            short,
            long,
            default_value = "inline",
            value_parser = OutputMode::try_parse,
            help = "Output mode: inline, changeset, split or terminal"
        )]
        output: OutputMode,
        #[arg(long, help = "Track scored elements across the diff")]
        scored: bool,
        #[arg(long, help = "Class of insertion wrappers")]
        ins_class: Option<String>,
        #[arg(long, help = "Class of deletion wrappers")]
        del_class: Option<String>,
        #[arg(long, help = "Class of replacement wrappers")]
        mod_class: Option<String>,
        #[arg(long, help = "Write to stdout even when it is a terminal")]
        no_pager: bool,
    },
    #[command(
        name = "tokenize",
        about = "List the tokens of a document",
        long_about = "This command prints every token of a document with its index and the id \
        of the tracked element it belongs to."
    )]
    Tokenize {
        #[arg(index = 1)]
        file: PathBuf,
        #[arg(long, help = "Read injected ids and scores")]
        scored: bool,
    },
    #[command(
        name = "opcodes",
        about = "List the operations turning one document into another",
        long_about = "This command prints the insert, delete, replace and equal operations \
        computed between the tokens of two documents."
    )]
    Opcodes {
        #[arg(index = 1)]
        old: PathBuf,
        #[arg(index = 2)]
        new: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Diff {
            old,
            new,
            output,
            scored,
            ins_class,
            del_class,
            mod_class,
            no_pager,
        } => {
            let defaults = WrapperClasses::default();
            let options = DiffOptions {
                output,
                scored,
                classes: WrapperClasses {
                    insert: ins_class.unwrap_or(defaults.insert),
                    delete: del_class.unwrap_or(defaults.delete),
                    replace: mod_class.unwrap_or(defaults.replace),
                },
            };

            let pager = use_pager(no_pager).then(PagedOutput::new);
            let writer: Box<dyn std::io::Write> = match &pager {
                Some(pager) => Box::new(pager.clone()),
                None => Box::new(std::io::stdout()),
            };

            let session = Session::new(
                writer,
                DiffEngine::new(options)?,
                Box::new(TextLengthScorer),
            );
            session.diff(&old, &new).await?;

            if let Some(pager) = pager {
                pager.show()?;
            }
        }
        Commands::Tokenize { file, scored } => {
            let options = DiffOptions {
                scored,
                ..Default::default()
            };
            let session = Session::new(
                Box::new(std::io::stdout()),
                DiffEngine::new(options)?,
                Box::new(TextLengthScorer),
            );

            session.tokenize(&file).await?
        }
        Commands::Opcodes { old, new } => {
            let session = Session::new(
                Box::new(std::io::stdout()),
                DiffEngine::new(DiffOptions::default())?,
                Box::new(TextLengthScorer),
            );

            session.opcodes(&old, &new).await?
        }
    }

    Ok(())
}

fn use_pager(no_pager: bool) -> bool {
    !no_pager && std::env::var_os("NO_PAGER").is_none() && std::io::stdout().is_terminal()
}
