use crate::areas::document::{Document, diff_documents};
use crate::areas::scorer::IdGenerator;
use crate::areas::session::Session;
use crate::artifacts::diff::engine::DiffOutput;
use anyhow::Context;
use colored::Colorize;
use std::path::Path;

impl Session {
    pub async fn diff(&self, old_path: &Path, new_path: &Path) -> anyhow::Result<()> {
        let (mut old, mut new) =
            tokio::try_join!(Document::load(old_path), Document::load(new_path))?;

        let mut ids = IdGenerator::new(format!("{}\0{}", old_path.display(), new_path.display()));
        tracing::info!(
            output = %self.engine().options().output,
            scored = self.engine().options().scored,
            "diffing documents"
        );

        let output = diff_documents(self.engine(), &mut old, &mut new, self.scorer(), &mut ids);

        match output {
            DiffOutput::Markup(markup) => writeln!(self.writer(), "{markup}")?,
            DiffOutput::Changeset(changeset) => {
                let json = serde_json::to_string_pretty(&changeset)
                    .context("unable to serialize changeset")?;
                writeln!(self.writer(), "{json}")?;
            }
            DiffOutput::Split(split) => {
                let mut writer = self.writer();
                writeln!(writer, "{}", format!("--- a/{}", old_path.display()).bold())?;
                writeln!(writer, "{}", split.left)?;
                writeln!(writer, "{}", format!("+++ b/{}", new_path.display()).bold())?;
                writeln!(writer, "{}", split.right)?;
            }
        }

        Ok(())
    }
}
