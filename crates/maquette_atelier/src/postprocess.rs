//! Output post-processing.

use crate::builder::GeneratedFile;
use crate::solution::PostProcessor;

/// Normalizes whitespace in every generated file: trailing spaces
/// stripped, at most one consecutive blank line, exactly one trailing
/// newline.
pub struct OutputNormalizer;

impl PostProcessor for OutputNormalizer {
    fn name(&self) -> &'static str {
        "normalize"
    }

    fn process(&self, file: GeneratedFile) -> GeneratedFile {
        let mut out = String::with_capacity(file.content.len());
        let mut blank_run = 0usize;

        for line in file.content.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                blank_run += 1;
                if blank_run > 1 || out.is_empty() {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            out.push_str(line);
            out.push('\n');
        }

        while out.ends_with("\n\n") {
            out.pop();
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }

        GeneratedFile::new(file.path, out)
    }
}
