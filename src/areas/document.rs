use crate::areas::scorer::{ContentScorer, ElementView, IdGenerator};
use crate::artifacts::diff::engine::{DiffEngine, DiffOutput};
use crate::artifacts::markup::{
    EXCLUDED_SCORE, MarkupPatterns, end_marker, id_attribute, score_attribute,
};
use anyhow::Context;
use derive_new::new;
use std::ops::Range;
use std::path::Path;

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Position of one element inside a document's markup
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ElementSpan {
    /// Lowercase tag name
    pub name: String,
    /// The opening tag
    pub open: Range<usize>,
    /// Content between the opening tag and the point where the element ends
    pub inner: Range<usize>,
    /// Byte offset right after the element, closing tag included
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Injected {
    Score,
    Annotation,
}

#[derive(Debug, new)]
struct Insertion {
    kind: Injected,
    position: usize,
    text: String,
}

/// A markup document on its way into or out of a diff
///
/// Metadata injected by `score` and `annotate` is tracked by position, so `clean` and
/// `descore` take out exactly what was added and leave metadata the markup already had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: Option<Box<Path>>,
    markup: String,
    injected: Vec<(Injected, Range<usize>)>,
}

impl Document {
    pub fn from_markup(markup: impl Into<String>) -> Self {
        Document {
            path: None,
            markup: markup.into(),
            injected: Vec::new(),
        }
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let markup = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("unable to read document {}", path.display()))?;

        tracing::debug!(path = %path.display(), bytes = markup.len(), "loaded document");

        Ok(Document {
            path: Some(path.into()),
            markup,
            injected: Vec::new(),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Inner markup of the `body` element, or the whole markup for fragments.
    pub fn body<'d>(&'d self, patterns: &MarkupPatterns) -> &'d str {
        patterns.body(&self.markup).unwrap_or(&self.markup)
    }

    /// Every element of the document, in the order the elements end.
    ///
    /// Elements left open when an enclosing element closes end where the closing tag starts;
    /// elements still open at the end of input end there. Void and self-closing elements end
    /// right after their own tag. Comments and the contents of `script` and `style` are not
    /// scanned for tags.
    pub fn elements(&self, patterns: &MarkupPatterns) -> Vec<ElementSpan> {
        let markup = self.markup.as_str();
        let lowered = markup.to_ascii_lowercase();
        let mut elements = Vec::new();
        let mut open: Vec<(String, Range<usize>)> = Vec::new();
        let mut cursor = 0;
        let mut comment = patterns.next_comment(markup, 0);

        while let Some(tag) = patterns.next_tag(markup, cursor) {
            if comment.as_ref().is_some_and(|comment| comment.start < cursor) {
                comment = patterns.next_comment(markup, cursor);
            }
            if let Some(end) = comment
                .as_ref()
                .filter(|comment| comment.start <= tag.start)
                .map(|comment| comment.end)
            {
                cursor = end;
                comment = patterns.next_comment(markup, cursor);
                continue;
            }

            cursor = tag.end;
            let text = &markup[tag.clone()];

            if text.starts_with("<!") || text.starts_with("<?") {
                continue;
            }

            if text.starts_with("</") {
                let name = tag_name(text);
                let Some(depth) = open.iter().rposition(|(open_name, _)| *open_name == name)
                else {
                    continue;
                };

                for (name, open_tag) in open.drain(depth + 1..).rev() {
                    elements.push(ElementSpan::new(
                        name,
                        open_tag.clone(),
                        open_tag.end..tag.start,
                        tag.start,
                    ));
                }
                if let Some((name, open_tag)) = open.pop() {
                    elements.push(ElementSpan::new(
                        name,
                        open_tag.clone(),
                        open_tag.end..tag.start,
                        tag.end,
                    ));
                }
                continue;
            }

            let name = tag_name(text);
            if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
                continue;
            }

            if text.ends_with("/>") || VOID_ELEMENTS.contains(&name.as_str()) {
                elements.push(ElementSpan::new(name, tag.clone(), tag.end..tag.end, tag.end));
                continue;
            }

            if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                let closing = format!("</{name}");
                cursor = lowered[tag.end..]
                    .find(&closing)
                    .map_or(markup.len(), |offset| tag.end + offset);
            }

            open.push((name, tag));
        }

        for (name, open_tag) in open.into_iter().rev() {
            elements.push(ElementSpan::new(
                name,
                open_tag.clone(),
                open_tag.end..markup.len(),
                markup.len(),
            ));
        }

        elements
    }

    /// Inject a score into every element the scorer has an opinion on.
    ///
    /// Elements that already carry a score keep it. Returns how many elements were scored.
    pub fn score(&mut self, patterns: &MarkupPatterns, scorer: &dyn ContentScorer) -> usize {
        let insertions = self
            .elements(patterns)
            .into_iter()
            .filter_map(|element| {
                let open_tag = &self.markup[element.open.clone()];
                if patterns.injected_score(open_tag).is_some() {
                    return None;
                }

                let text = patterns.visible_text(&self.markup[element.inner.clone()]);
                let view = ElementView::new(&element.name, open_tag, text);
                let score = scorer.score(&view)?;

                Some(Insertion::new(
                    Injected::Score,
                    attribute_position(open_tag, element.open.start),
                    score_attribute(score),
                ))
            })
            .collect::<Vec<_>>();

        let scored = insertions.len();
        self.apply(insertions);
        scored
    }

    /// Give every tracked element an id and mark where it ends.
    ///
    /// Elements without a score, excluded elements and elements that already have an id are
    /// left alone. Returns how many elements were annotated.
    pub fn annotate(&mut self, patterns: &MarkupPatterns, ids: &mut IdGenerator) -> usize {
        let mut insertions = Vec::new();

        for element in self.elements(patterns) {
            let open_tag = &self.markup[element.open.clone()];
            match patterns.injected_score(open_tag) {
                None | Some(EXCLUDED_SCORE) => continue,
                Some(_) if patterns.injected_id(open_tag).is_some() => continue,
                Some(_) => {}
            }

            let id = ids.next_id();
            insertions.push(Insertion::new(
                Injected::Annotation,
                attribute_position(open_tag, element.open.start),
                id_attribute(&id),
            ));
            insertions.push(Insertion::new(
                Injected::Annotation,
                element.end,
                end_marker(&id),
            ));
        }

        let annotated = insertions.len() / 2;
        self.apply(insertions);
        annotated
    }

    /// Remove the ids and end markers added by `annotate`.
    pub fn clean(&mut self) {
        self.remove(Injected::Annotation);
    }

    /// Remove the scores added by `score`.
    pub fn descore(&mut self) {
        self.remove(Injected::Score);
    }

    fn apply(&mut self, mut insertions: Vec<Insertion>) {
        if insertions.is_empty() {
            return;
        }

        insertions.sort_by_key(|insertion| insertion.position);
        let offsets = running_totals(insertions.iter().map(|insertion| insertion.text.len()));

        // earlier injections move by everything inserted at or before them
        for (_, range) in &mut self.injected {
            let shift = offsets[insertions.partition_point(|i| i.position <= range.start)];
            *range = range.start + shift..range.end + shift;
        }

        let mut markup = String::with_capacity(self.markup.len() + offsets[insertions.len()]);
        let mut cursor = 0;

        for insertion in insertions {
            markup.push_str(&self.markup[cursor..insertion.position]);
            let start = markup.len();
            markup.push_str(&insertion.text);
            self.injected.push((insertion.kind, start..markup.len()));
            cursor = insertion.position;
        }
        markup.push_str(&self.markup[cursor..]);

        self.markup = markup;
    }

    fn remove(&mut self, kind: Injected) {
        let (mut removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.injected)
            .into_iter()
            .partition(|(injected, _)| *injected == kind);
        removed.sort_by_key(|(_, range)| range.start);

        let mut markup = String::with_capacity(self.markup.len());
        let mut cursor = 0;
        for (_, range) in &removed {
            markup.push_str(&self.markup[cursor..range.start]);
            cursor = range.end;
        }
        markup.push_str(&self.markup[cursor..]);

        let offsets = running_totals(removed.iter().map(|(_, range)| range.len()));
        self.injected = kept
            .into_iter()
            .map(|(injected, range)| {
                let shift = offsets[removed.partition_point(|(_, r)| r.end <= range.start)];
                (injected, range.start - shift..range.end - shift)
            })
            .collect();
        self.markup = markup;
    }
}

/// Diff the bodies of two documents, tracking scored elements when the engine asks for it.
///
/// Both documents are handed back without any injected metadata.
pub fn diff_documents(
    engine: &DiffEngine,
    old: &mut Document,
    new: &mut Document,
    scorer: &dyn ContentScorer,
    ids: &mut IdGenerator,
) -> DiffOutput {
    let patterns = engine.patterns();
    let scored = engine.options().scored;

    if scored {
        for document in [&mut *old, &mut *new] {
            let scored = document.score(patterns, scorer);
            let annotated = document.annotate(patterns, ids);
            tracing::debug!(scored, annotated, "prepared document for tracking");
        }
    }

    let output = engine.diff(old.body(patterns), new.body(patterns));

    if scored {
        for document in [old, new] {
            document.clean();
            document.descore();
        }
    }

    output
}

// Prefix sums, starting at zero.
fn running_totals(lengths: impl Iterator<Item = usize>) -> Vec<usize> {
    std::iter::once(0)
        .chain(lengths.scan(0, |total, length| {
            *total += length;
            Some(*total)
        }))
        .collect()
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches(['<', '/'])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

// Attributes go right before `>` or `/>`.
fn attribute_position(open_tag: &str, start: usize) -> usize {
    let closer = if open_tag.ends_with("/>") { 2 } else { 1 };
    start + open_tag.len() - closer
}
