//! `maquette export` - schema document to source project.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::Args;
use maquette_atelier::{export_source_code, Artifact, ExportOptions, PublisherKind};
use maquette_relief::SchemaNode;

#[derive(Args)]
pub struct ExportArgs {
    /// Schema JSON document (an array of component nodes)
    pub schema: PathBuf,

    /// Output path: a `.zip` archive, or a directory with `--files`
    #[arg(short, long, default_value = "maquette-app.zip")]
    pub out: PathBuf,

    /// Project name used in the manifest and archive root
    #[arg(long)]
    pub project_name: Option<String>,

    /// Write the raw file tree into a directory instead of an archive
    #[arg(long)]
    pub files: bool,
}

pub fn run(args: ExportArgs) {
    let source = match fs::read_to_string(&args.schema) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {}: {err}", args.schema.display());
            exit(1);
        }
    };

    let schema: Vec<SchemaNode> = match serde_json::from_str(&source) {
        Ok(schema) => schema,
        Err(err) => {
            eprintln!("error: invalid schema document: {err}");
            exit(1);
        }
    };

    let options = ExportOptions {
        project_name: args.project_name.unwrap_or_default(),
        publisher: if args.files {
            PublisherKind::None
        } else {
            PublisherKind::Zip
        },
        solution: None,
    };

    let artifact = match export_source_code(&schema, options) {
        Ok(artifact) => artifact,
        Err(err) => {
            eprintln!("error: export failed: {err}");
            exit(1);
        }
    };

    if let Err(err) = write_artifact(&artifact, &args.out) {
        eprintln!("error: cannot write output: {err}");
        exit(1);
    }
}

fn write_artifact(artifact: &Artifact, out: &Path) -> std::io::Result<()> {
    match artifact {
        Artifact::Archive { file_name, bytes } => {
            let target = if out.extension().is_some() {
                out.to_path_buf()
            } else {
                out.join(file_name)
            };
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, bytes)?;
            println!("wrote {}", target.display());
        }
        Artifact::Files(files) => {
            for file in files {
                let target = out.join(&file.path);
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&target, &file.content)?;
            }
            println!("wrote {} files under {}", files.len(), out.display());
        }
    }
    Ok(())
}
