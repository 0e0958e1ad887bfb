use crate::areas::scorer::ContentScorer;
use crate::artifacts::diff::engine::DiffEngine;
use std::cell::{RefCell, RefMut};

/// Everything a command needs: where to write, how to diff and how to score
pub struct Session {
    writer: RefCell<Box<dyn std::io::Write>>,
    engine: DiffEngine,
    scorer: Box<dyn ContentScorer>,
}

impl Session {
    pub fn new(
        writer: Box<dyn std::io::Write>,
        engine: DiffEngine,
        scorer: Box<dyn ContentScorer>,
    ) -> Self {
        Session {
            writer: RefCell::new(writer),
            engine,
            scorer,
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn engine(&self) -> &DiffEngine {
        &self.engine
    }

    pub fn scorer(&self) -> &dyn ContentScorer {
        self.scorer.as_ref()
    }
}
