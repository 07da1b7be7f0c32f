//! Directory stack remembering where the user came from

/// One level of descent: the directory entered and the line selected
/// in its parent when it was entered
#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    name: String,
    lineno: usize,
}

/// Stack of entered directories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirStack {
    frames: Vec<Frame>,
}

impl DirStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stack for a starting path such as `src/git` or `src/git/`
    ///
    /// Saved selections of the synthetic frames are 0.
    pub fn from_path(path: &str) -> Self {
        let frames = path
            .split('/')
            .filter(|part| !part.is_empty() && *part != ".")
            .map(|name| Frame {
                name: name.to_string(),
                lineno: 0,
            })
            .collect();
        Self { frames }
    }

    /// Current directory as `""` (root) or `"a/b/"`
    pub fn path(&self) -> String {
        self.frames
            .iter()
            .map(|frame| format!("{}/", frame.name))
            .collect()
    }

    pub fn is_root(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Descend into `name`, remembering the parent's selected line
    pub fn push(&mut self, name: &str, lineno: usize) {
        self.frames.push(Frame {
            name: name.to_string(),
            lineno,
        });
    }

    /// Ascend one level, returning the line to select in the parent
    pub fn pop(&mut self) -> Option<usize> {
        self.pop_frame().map(|(_, lineno)| lineno)
    }

    /// Ascend one level, returning the directory left and its saved line
    pub fn pop_frame(&mut self) -> Option<(String, usize)> {
        self.frames.pop().map(|frame| (frame.name, frame.lineno))
    }
}
