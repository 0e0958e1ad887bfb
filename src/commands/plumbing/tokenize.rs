use crate::areas::document::Document;
use crate::areas::session::Session;
use std::path::Path;

impl Session {
    pub async fn tokenize(&self, path: &Path) -> anyhow::Result<()> {
        let document = Document::load(path).await?;
        let tokenized = self.engine().tokenize(document.markup());
        let mut writer = self.writer();

        for token in &tokenized.tokens {
            writeln!(
                writer,
                "{}\t{}\t{:?}",
                token.index(),
                token.id().unwrap_or("-"),
                token.text()
            )?;
        }

        for entry in tokenized.scores.iter() {
            writeln!(writer, "score {} {}", entry.id, entry.score)?;
        }

        Ok(())
    }
}
