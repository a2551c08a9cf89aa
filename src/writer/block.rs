use std::path::Path;

use crate::error::{Error, Result};

/// A region of a hand-maintained file that this tool owns: everything
/// strictly between the `open` line and the next `close` line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManagedBlock {
    pub open: &'static str,
    pub close: &'static str,
}

/// The `static_libs` list of the app module in the root `Android.bp`.
pub const ANDROID_BP_STATIC_LIBS: ManagedBlock = ManagedBlock {
    open: "    static_libs: [",
    close: "    ],",
};

/// The top-level `dependencies` block of a Gradle build script.
pub const GRADLE_DEPENDENCIES: ManagedBlock = ManagedBlock {
    open: "dependencies {",
    close: "}",
};

impl ManagedBlock {
    /// Replace the block's interior in `text` with `lines`. Bytes outside the
    /// block, line endings included, are kept as they are. `path` is only
    /// used in error messages.
    pub fn replace(&self, text: &str, lines: &[String], path: &Path) -> Result<String> {
        let err = |message: String| Error::ManagedBlock {
            path: path.to_path_buf(),
            message,
        };

        let mut offset = 0;
        let mut open: Option<(usize, &str)> = None;
        let mut close: Option<usize> = None;
        for line in text.split_inclusive('\n') {
            let start = offset;
            offset += line.len();
            let content = line.trim_end_matches('\n').trim_end_matches('\r');

            if open.is_none() {
                if content == self.open {
                    open = Some((offset, &line[content.len()..]));
                }
            } else if close.is_none() {
                if content == self.close {
                    close = Some(start);
                }
            } else if content == self.open {
                return Err(err(format!("more than one '{}' block", self.open)));
            }
        }

        let (body_start, newline) =
            open.ok_or_else(|| err(format!("no '{}' line found", self.open)))?;
        let body_end = close.ok_or_else(|| {
            err(format!(
                "'{}' block is not closed by '{}'",
                self.open, self.close
            ))
        })?;

        // A closed block implies the open line ended with a newline; new
        // lines reuse its ending so CRLF files stay CRLF.
        let mut out = String::with_capacity(text.len());
        out.push_str(&text[..body_start]);
        for line in lines {
            out.push_str(line);
            out.push_str(newline);
        }
        out.push_str(&text[body_end..]);
        Ok(out)
    }
}
