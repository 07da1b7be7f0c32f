//! Blob content access

use std::io::Write;

use super::{GitRepo, ObjectId};
use crate::error::Result;

/// Number of leading bytes inspected for binary detection (same as git)
const BINARY_PROBE_LEN: usize = 8000;

/// Anything that can resolve an object id to blob content
pub trait BlobSource {
    /// Read the whole blob into memory
    fn read_blob(&self, id: &ObjectId) -> Result<Vec<u8>>;

    /// Stream the blob into `out`
    fn write_blob(&self, id: &ObjectId, out: &mut dyn Write) -> Result<()> {
        let content = self.read_blob(id)?;
        out.write_all(&content)?;
        Ok(())
    }
}

impl BlobSource for GitRepo {
    fn read_blob(&self, id: &ObjectId) -> Result<Vec<u8>> {
        self.run(["cat-file", "blob", id.as_str()])
    }

    fn write_blob(&self, id: &ObjectId, out: &mut dyn Write) -> Result<()> {
        self.run_to(["cat-file", "blob", id.as_str()], out)
    }
}

/// Whether content looks binary (a NUL byte near the start)
pub fn is_binary(content: &[u8]) -> bool {
    content
        .iter()
        .take(BINARY_PROBE_LEN)
        .any(|&b| b == 0)
}
