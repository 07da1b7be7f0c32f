//! Application configuration from CLI arguments

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::config_file::ConfigFile;
use crate::git::GitRepo;
use crate::integrate::{exit_code, OutputFormat};
use crate::tree::{SortField, SortOrder, TreeNavigator};
use crate::view::TreeColumns;

/// What the binary should do after parsing arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Interactive tree browser
    Browse,
    /// Print the listing and exit
    List(OutputFormat),
    /// Print usage and exit
    Help,
    /// Print version and exit
    Version,
}

/// Application configuration from CLI args and config file
#[derive(Debug)]
pub struct Config {
    pub mode: RunMode,
    /// Directory to discover the repository from (`-C`)
    pub dir: PathBuf,
    /// Revision whose tree is browsed
    pub revision: String,
    /// Starting directory inside the tree
    pub start_path: String,
    pub sort: SortOrder,
    pub annotate: bool,
    /// Editor command from the config file
    pub editor_command: Option<String>,
    pub editor_line_number: bool,
    pub columns: TreeColumns,
    /// Syntax highlight blobs
    pub highlight: bool,
}

impl Config {
    pub fn from_args() -> anyhow::Result<Self> {
        // Load config file first (provides defaults)
        Self::parse(env::args().skip(1), ConfigFile::load())
    }

    /// Parse `args` (without the program name) over `config_file` defaults
    pub fn parse<I>(args: I, config_file: ConfigFile) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut mode = RunMode::Browse;
        let mut list = false;
        let mut format = OutputFormat::default();
        let mut dir = env::current_dir()?;
        let mut revision: Option<String> = None;
        let mut start_path: Option<String> = None;
        let mut sort_field: Option<SortField> = None;
        let mut reverse: Option<bool> = None;
        let mut annotate: Option<bool> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--list" | "-l" => list = true,
                "--format" | "-f" => {
                    if let Some(fmt) = args.next() {
                        format = OutputFormat::from_str(&fmt).map_err(|_| {
                            anyhow::anyhow!("Invalid format '{}'. Valid formats: lines, json", fmt)
                        })?;
                    } else {
                        anyhow::bail!("--format requires a value (lines or json)");
                    }
                }
                "-C" => {
                    if let Some(path) = args.next() {
                        let p = dir.join(path);
                        if !p.is_dir() {
                            anyhow::bail!("Not a directory: {}", p.display());
                        }
                        dir = p;
                    } else {
                        anyhow::bail!("-C requires a directory");
                    }
                }
                "--sort" | "-s" => {
                    if let Some(field) = args.next() {
                        sort_field = Some(field.parse().map_err(anyhow::Error::msg)?);
                    } else {
                        anyhow::bail!("--sort requires a value (name, date, author or size)");
                    }
                }
                "--reverse" | "-r" => reverse = Some(true),
                "--no-annotate" => annotate = Some(false),
                "--annotate" => annotate = Some(true),
                "--help" | "-h" => mode = RunMode::Help,
                "--version" | "-V" => mode = RunMode::Version,
                "--" => {
                    if let Some(path) = args.next() {
                        start_path = Some(path);
                    }
                    if let Some(extra) = args.next() {
                        anyhow::bail!("Only one path may follow --, got '{}'", extra);
                    }
                }
                rev if !rev.starts_with('-') => {
                    if revision.is_some() {
                        anyhow::bail!(
                            "Unexpected argument: {}. Use -- before a path.",
                            rev
                        );
                    }
                    revision = Some(rev.to_string());
                }
                unknown => {
                    anyhow::bail!(
                        "Unknown option: {}. Use --help for usage information.",
                        unknown
                    );
                }
            }
        }

        if mode == RunMode::Browse && list {
            mode = RunMode::List(format);
        }

        let mut sort = config_file.tree.sort_order();
        if let Some(field) = sort_field {
            sort.field = field;
        }
        if let Some(reverse) = reverse {
            sort.reverse = reverse;
        }

        // CLI arguments take precedence over config file
        Ok(Self {
            mode,
            dir,
            revision: revision.unwrap_or_else(|| "HEAD".to_string()),
            start_path: normalize_start_path(start_path.as_deref().unwrap_or("")),
            sort,
            annotate: annotate.unwrap_or(config_file.tree.annotate),
            columns: TreeColumns {
                show_id: config_file.ui.show_id,
                show_date: true,
                show_size: config_file.ui.show_size,
                date_format: config_file.ui.date_format(),
            },
            highlight: config_file.ui.highlight,
            editor_command: config_file.editor.command,
            editor_line_number: config_file.editor.line_number,
        })
    }

    /// Open the repository and position a navigator at the start path
    pub fn navigator(&self) -> anyhow::Result<TreeNavigator> {
        let repo = GitRepo::discover(&self.dir)?;
        let commit = repo.resolve_commit(&self.revision)?;
        tracing::info!(
            "Browsing {} ({}) in {}",
            self.revision,
            commit.short(),
            repo.root().display()
        );
        Ok(TreeNavigator::new(repo, commit, &self.start_path)
            .with_sort(self.sort)
            .with_annotation(self.annotate))
    }
}

/// `./src//ui/` -> `src/ui`
fn normalize_start_path(path: &str) -> String {
    path.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

pub fn print_help() {
    println!(
        r#"revtree - browse the tree of a git revision

USAGE:
    revtree [OPTIONS] [REVISION] [-- PATH]

ARGS:
    REVISION            Commit-ish to browse (default: HEAD)
    PATH                Directory inside the tree to start in

OPTIONS:
    -C DIR              Run as if started in DIR
    -l, --list          Print the directory listing and exit
    -f, --format FMT    Listing format: lines, json
    -s, --sort FIELD    Sort by name, date, author or size
    -r, --reverse       Reverse the sort order
    --no-annotate       Skip looking up the last change of each entry
    -h, --help          Show this help message
    -V, --version       Show version

CONFIG FILE:
    ~/.config/revtree/config.toml    Main configuration file
    ~/.config/revtree/keymap.toml    Key bindings (customizable)

ENVIRONMENT:
    REVTREE_LOG         Log filter (e.g. revtree=debug)
    GIT_EDITOR, VISUAL, EDITOR
                        Editor used to open blobs

KEYBINDINGS:
    j/↓ k/↑     Move down / up
    Space b     Page down / up
    g G         Go to top / bottom
    Enter l →   Open directory or blob
    h ← BS      Parent directory (closes the blob view)
    e           Open blob in editor
    i d a s     Sort by name / date / author / size
    r           Reverse sort order
    /           Search
    n N         Next / previous match
    R/F5        Refresh
    q           Close view (quit from the tree)
    Q           Quit

EXIT CODES:
    {}           Success
    {}           Error (runtime error)
    {}           Invalid arguments (unknown option or invalid value)
"#,
        exit_code::SUCCESS,
        exit_code::ERROR,
        exit_code::INVALID
    );
}
