use crate::areas::document::Document;
use crate::areas::session::Session;
use crate::artifacts::tokens::token::join_text;
use std::path::Path;

impl Session {
    pub async fn opcodes(&self, old_path: &Path, new_path: &Path) -> anyhow::Result<()> {
        let (old, new) = tokio::try_join!(Document::load(old_path), Document::load(new_path))?;
        let comparison = self.engine().compare(old.markup(), new.markup());
        let mut writer = self.writer();

        for operation in &comparison.operations {
            writeln!(
                writer,
                "{} {:?} {:?}",
                operation,
                join_text(&comparison.old_tokens[operation.old_range()]),
                join_text(&comparison.new_tokens[operation.new_range()])
            )?;
        }

        Ok(())
    }
}
