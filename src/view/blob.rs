//! Blob view: the content of a single file

use ratatui::{layout::Rect, Frame};
use regex::Regex;

use super::{Request, RequestOutcome, ViewKind, ViewOps};
use crate::core::ViewState;
use crate::error::Result;
use crate::git::{is_binary, BlobSource, GitRepo, ObjectId};
use crate::render::{highlight_content, render_text, StyledLine};

/// Shows one blob, line by line
pub struct BlobView<S: BlobSource = GitRepo> {
    source: S,
    id: ObjectId,
    /// Repository path the blob was opened from
    name: String,
    highlight: bool,
    lines: Vec<String>,
    styled: Option<Vec<StyledLine>>,
}

impl<S: BlobSource> BlobView<S> {
    pub fn new(source: S, id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            source,
            id,
            name: name.into(),
            highlight: true,
            lines: Vec::new(),
            styled: None,
        }
    }

    pub fn with_highlighting(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_highlighted(&self) -> bool {
        self.styled.is_some()
    }
}

impl<S: BlobSource> ViewOps for BlobView<S> {
    fn kind(&self) -> ViewKind {
        ViewKind::Blob
    }

    fn title(&self) -> String {
        format!("blob {} {}", self.id.short(), self.name)
    }

    fn open(&mut self, state: &mut ViewState) -> Result<()> {
        let content = self.source.read_blob(&self.id)?;

        if is_binary(&content) {
            self.lines = vec![format!("[binary blob, {} bytes]", content.len())];
            self.styled = None;
        } else {
            let text = String::from_utf8_lossy(&content);
            self.lines = text.lines().map(String::from).collect();
            self.styled = if self.highlight {
                highlight_content(&text, &self.name)
            } else {
                None
            };
        }

        tracing::debug!("Opened blob {} ({} lines)", self.id.short(), self.lines.len());
        state.move_to(state.lineno, self.lines.len());
        Ok(())
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn draw(&self, frame: &mut Frame, area: Rect, state: &ViewState) {
        render_text(
            frame,
            area,
            &self.title(),
            &self.lines,
            self.styled.as_deref(),
            state,
        );
    }

    fn request(&mut self, request: Request, state: &mut ViewState) -> Result<RequestOutcome> {
        let outcome = match request {
            Request::Edit => RequestOutcome::Edit {
                id: self.id.clone(),
                name: self.name.clone(),
                lineno: u32::try_from(state.lineno + 1).unwrap_or(u32::MAX),
            },
            Request::Parent => RequestOutcome::Close,
            Request::Refresh => RequestOutcome::Reload,
            _ => RequestOutcome::None,
        };
        Ok(outcome)
    }

    fn select(&self, state: &ViewState) -> Option<String> {
        if self.lines.is_empty() {
            return Some("Empty file".to_string());
        }
        Some(format!("Line {} of {}", state.lineno + 1, self.lines.len()))
    }

    fn grep(&self, lineno: usize, pattern: &Regex) -> bool {
        self.lines
            .get(lineno)
            .is_some_and(|line| pattern.is_match(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RevtreeError;

    struct Fixed(Vec<u8>);

    impl BlobSource for Fixed {
        fn read_blob(&self, _id: &ObjectId) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    struct Unreadable;

    impl BlobSource for Unreadable {
        fn read_blob(&self, _id: &ObjectId) -> Result<Vec<u8>> {
            Err(RevtreeError::git("bad object"))
        }
    }

    fn id() -> ObjectId {
        ObjectId::parse(&"9a".repeat(20)).unwrap()
    }

    fn opened(content: &[u8], name: &str) -> (BlobView<Fixed>, ViewState) {
        let mut view = BlobView::new(Fixed(content.to_vec()), id(), name);
        let mut state = ViewState::default();
        view.open(&mut state).unwrap();
        (view, state)
    }

    #[test]
    fn test_open_splits_lines_and_highlights() {
        let (view, _) = opened(b"fn a() {}\nfn b() {}\n", "src/lib.rs");
        assert_eq!(view.line_count(), 2);
        assert_eq!(view.lines()[1], "fn b() {}");
        assert!(view.is_highlighted());
        assert_eq!(view.title(), "blob 9a9a9a9 src/lib.rs");
    }

    #[test]
    fn test_binary_blob() {
        let (view, state) = opened(b"GIF89a\0\0\x01", "logo.gif");
        assert_eq!(view.lines(), ["[binary blob, 9 bytes]"]);
        assert!(!view.is_highlighted());
        assert_eq!(view.select(&state).unwrap(), "Line 1 of 1");
    }

    #[test]
    fn test_highlighting_disabled() {
        let mut view = BlobView::new(Fixed(b"fn a() {}\n".to_vec()), id(), "a.rs")
            .with_highlighting(false);
        view.open(&mut ViewState::default()).unwrap();
        assert!(!view.is_highlighted());
    }

    #[test]
    fn test_edit_uses_one_based_line() {
        let (mut view, mut state) = opened(b"a\nb\nc\n", "notes.txt");
        state.move_to(2, view.line_count());
        let outcome = view.request(Request::Edit, &mut state).unwrap();
        assert_eq!(
            outcome,
            RequestOutcome::Edit {
                id: id(),
                name: "notes.txt".to_string(),
                lineno: 3,
            }
        );
    }

    #[test]
    fn test_parent_closes_view() {
        let (mut view, mut state) = opened(b"a\n", "a.txt");
        assert_eq!(
            view.request(Request::Parent, &mut state).unwrap(),
            RequestOutcome::Close
        );
    }

    #[test]
    fn test_grep_and_select() {
        let (view, state) = opened(b"alpha\nbeta\n", "x.txt");
        let pattern = Regex::new("^be").unwrap();
        assert!(!view.grep(0, &pattern));
        assert!(view.grep(1, &pattern));
        assert!(!view.grep(5, &pattern));
        assert_eq!(view.select(&state).unwrap(), "Line 1 of 2");
    }

    #[test]
    fn test_empty_blob() {
        let (view, state) = opened(b"", "empty");
        assert_eq!(view.line_count(), 0);
        assert_eq!(view.select(&state).unwrap(), "Empty file");
    }

    #[test]
    fn test_unreadable_blob_fails_open() {
        let mut view = BlobView::new(Unreadable, id(), "gone.txt");
        assert!(view.open(&mut ViewState::default()).is_err());
    }
}
