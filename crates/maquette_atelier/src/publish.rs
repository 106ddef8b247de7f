//! Publishers: file set → deliverable.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

use crate::builder::GeneratedFile;
use crate::error::PublishError;

/// The export deliverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// Raw in-memory file list, for previews and tests.
    Files(Vec<GeneratedFile>),

    /// Downloadable archive.
    Archive { file_name: String, bytes: Vec<u8> },
}

impl Artifact {
    pub fn files(&self) -> Option<&[GeneratedFile]> {
        match self {
            Self::Files(files) => Some(files),
            Self::Archive { .. } => None,
        }
    }
}

pub trait Publisher {
    fn name(&self) -> &'static str;

    fn publish(
        &self,
        project_name: &str,
        files: Vec<GeneratedFile>,
    ) -> Result<Artifact, PublishError>;
}

/// Which stock publisher the export should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublisherKind {
    #[default]
    Zip,
    None,
}

impl PublisherKind {
    pub fn create(self) -> Box<dyn Publisher> {
        match self {
            Self::Zip => Box::new(ZipPublisher),
            Self::None => Box::new(NonePublisher),
        }
    }
}

/// Passes the file list through untouched.
pub struct NonePublisher;

impl Publisher for NonePublisher {
    fn name(&self) -> &'static str {
        "none"
    }

    fn publish(
        &self,
        _project_name: &str,
        files: Vec<GeneratedFile>,
    ) -> Result<Artifact, PublishError> {
        Ok(Artifact::Files(files))
    }
}

/// Deflate archive with the project folder as its root.
pub struct ZipPublisher;

impl Publisher for ZipPublisher {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn publish(
        &self,
        project_name: &str,
        files: Vec<GeneratedFile>,
    ) -> Result<Artifact, PublishError> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for file in &files {
            writer.start_file(format!("{project_name}/{}", file.path), options)?;
            writer.write_all(file.content.as_bytes())?;
        }

        let bytes = writer.finish()?.into_inner();
        Ok(Artifact::Archive {
            file_name: format!("{project_name}.zip"),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_publisher_returns_files() {
        let files = vec![GeneratedFile::new("a.ts", "x")];
        let artifact = NonePublisher.publish("demo", files.clone()).unwrap();
        assert_eq!(artifact.files(), Some(files.as_slice()));
    }

    #[test]
    fn test_zip_publisher_produces_archive() {
        let files = vec![
            GeneratedFile::new("package.json", "{}"),
            GeneratedFile::new("src/main.tsx", "export {};"),
        ];
        let artifact = ZipPublisher.publish("demo", files).unwrap();

        let Artifact::Archive { file_name, bytes } = artifact else {
            panic!("expected archive");
        };
        assert_eq!(file_name, "demo.zip");
        // Zip local file header magic.
        assert_eq!(&bytes[..4], b"PK\x03\x04".as_slice());

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        assert!(archive.by_name("demo/package.json").is_ok());
        assert!(archive.by_name("demo/src/main.tsx").is_ok());
    }
}
