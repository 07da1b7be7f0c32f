//! Last-change annotation of tree entries
//!
//! Walks `git log --pretty=raw --raw` newest-first and records, for every
//! wanted entry name, the first commit whose raw diff touches it.

use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader};
use std::process::Stdio;

use chrono::{DateTime, FixedOffset};

use super::{GitRepo, ObjectId};
use crate::error::{Result, RevtreeError};

/// Author and date of the commit that last touched an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitStamp {
    pub commit: ObjectId,
    pub author: String,
    pub time: DateTime<FixedOffset>,
}

impl GitRepo {
    /// Find the newest commit touching each of `names` inside `dir`
    ///
    /// Stops reading the log as soon as every name has been seen.
    pub fn annotate_entries(
        &self,
        commit: &ObjectId,
        dir: &str,
        names: &HashSet<String>,
    ) -> Result<HashMap<String, CommitStamp>> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }

        let mut cmd = self.command()?;
        cmd.args([
            "-c",
            "core.quotepath=false",
            "log",
            "--no-color",
            "--pretty=raw",
            "--cc",
            "--raw",
            "--no-renames",
            "--root",
            commit.as_str(),
            "--",
        ]);
        if !dir.is_empty() {
            cmd.arg(dir);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn()?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| RevtreeError::internal("git log stdout not captured"))?;
        let scanned = scan_log(BufReader::new(stdout), dir, names);

        let stopped_early = match &scanned {
            Ok(stamps) => stamps.len() == names.len(),
            Err(_) => true,
        };
        if stopped_early {
            // git may still be blocked on a full pipe
            let _ = child.kill();
            let _ = child.wait();
            return scanned;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RevtreeError::git(format!("git log failed: {}", stderr.trim())));
        }
        scanned
    }
}

/// Scan raw log output; see [`GitRepo::annotate_entries`]
pub fn scan_log<R: BufRead>(
    mut reader: R,
    dir: &str,
    names: &HashSet<String>,
) -> Result<HashMap<String, CommitStamp>> {
    let mut stamps: HashMap<String, CommitStamp> = HashMap::new();
    let mut commit: Option<ObjectId> = None;
    let mut author: Option<(String, DateTime<FixedOffset>)> = None;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Paths are raw bytes with quoting disabled
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);

        if let Some(rest) = line.strip_prefix("commit ") {
            let id = rest.split_whitespace().next().unwrap_or_default();
            commit = Some(ObjectId::parse(id)?);
            author = None;
        } else if let Some(rest) = line.strip_prefix("author ") {
            author = parse_author(rest);
        } else if line.starts_with(':') {
            let (Some(commit), Some((name, time))) = (&commit, &author) else {
                continue;
            };
            for path in line.split('\t').skip(1) {
                let path = unquote_path(path);
                let Some(entry) = first_component(&path, dir) else {
                    continue;
                };
                if names.contains(entry) && !stamps.contains_key(entry) {
                    stamps.insert(
                        entry.to_string(),
                        CommitStamp {
                            commit: commit.clone(),
                            author: name.clone(),
                            time: *time,
                        },
                    );
                }
            }
            if stamps.len() == names.len() {
                break;
            }
        }
    }

    Ok(stamps)
}

/// Parse `Name <email> <epoch> <tz>` from an author/committer line
pub fn parse_author(rest: &str) -> Option<(String, DateTime<FixedOffset>)> {
    let mut tail = rest.rsplitn(3, ' ');
    let tz = tail.next()?;
    let epoch: i64 = tail.next()?.parse().ok()?;
    let ident = tail.next()?;

    let name = ident
        .split_once(" <")
        .map(|(name, _)| name)
        .unwrap_or(ident)
        .trim()
        .to_string();

    let offset = parse_tz(tz)?;
    let time = DateTime::from_timestamp(epoch, 0)?.with_timezone(&offset);
    Some((name, time))
}

fn parse_tz(tz: &str) -> Option<FixedOffset> {
    let (sign, digits) = match tz.as_bytes().first()? {
        b'+' => (1, &tz[1..]),
        b'-' => (-1, &tz[1..]),
        _ => return None,
    };
    if digits.len() != 4 {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// First path component below `dir`, or `None` for paths outside it
fn first_component<'a>(path: &'a str, dir: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(dir)?;
    let first = rest.split('/').next()?;
    (!first.is_empty()).then_some(first)
}

/// Undo git's C-style quoting of unusual path names
fn unquote_path(path: &str) -> String {
    let Some(inner) = path
        .strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
    else {
        return path.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.bytes().peekable();
    while let Some(b) = chars.next() {
        if b != b'\\' {
            bytes.push(b);
            continue;
        }
        match chars.next() {
            Some(b'n') => bytes.push(b'\n'),
            Some(b't') => bytes.push(b'\t'),
            Some(b'"') => bytes.push(b'"'),
            Some(b'\\') => bytes.push(b'\\'),
            Some(d @ b'0'..=b'7') => {
                let mut value = u32::from(d - b'0');
                for _ in 0..2 {
                    match chars.peek() {
                        Some(&o @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(o - b'0');
                            chars.next();
                        }
                        _ => break,
                    }
                }
                bytes.push(value as u8);
            }
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
