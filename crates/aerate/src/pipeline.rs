//! Per-file canonicalize-and-render pipeline.
//!
//! Files are processed in parallel on the global rayon pool. Every entity
//! owns its description tree, so workers share only the read-only
//! configuration and cross-reference index. A failing entity is recorded
//! and skipped; the rest of its file is still rendered.

use std::path::{Path, PathBuf};

use aerate_canonical::{CanonicalizeError, canonicalize};
use aerate_config::RenderConfig;
use aerate_render::{RenderContext, RenderError, XrefIndex, indent, render_paragraphs};
use aerate_tree::{TreeNode, XmlTreeParser};
use rayon::prelude::*;

use crate::doxygen::{Compound, Entity, load_compounds};
use crate::error::CliError;

/// Why a single entity could not be rendered.
#[derive(Debug, thiserror::Error)]
pub(crate) enum EntityError {
    #[error("{0}")]
    Canonicalize(#[from] CanonicalizeError),

    #[error("{0}")]
    Render(#[from] RenderError),
}

/// A skipped entity.
#[derive(Debug)]
pub(crate) struct EntityFailure {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) error: EntityError,
}

/// Rendered document for one compound file.
#[derive(Debug)]
pub(crate) struct RenderedFile {
    pub(crate) source: PathBuf,
    pub(crate) document: String,
    /// Number of entities rendered.
    pub(crate) rendered: usize,
    pub(crate) failures: Vec<EntityFailure>,
}

impl RenderedFile {
    /// Output file name: the source stem with an `.rst` extension.
    pub(crate) fn output_name(&self) -> PathBuf {
        let stem = self.source.file_stem().unwrap_or(self.source.as_os_str());
        Path::new(stem).with_extension("rst")
    }
}

/// Outcome of a file that could not be loaded at all.
#[derive(Debug)]
pub(crate) struct FileFailure {
    pub(crate) source: PathBuf,
    pub(crate) error: CliError,
}

/// Results of a whole run, in input order.
#[derive(Debug, Default)]
pub(crate) struct RunReport {
    pub(crate) files: Vec<RenderedFile>,
    pub(crate) load_failures: Vec<FileFailure>,
}

impl RunReport {
    pub(crate) fn rendered(&self) -> usize {
        self.files.iter().map(|f| f.rendered).sum()
    }

    pub(crate) fn entity_failures(&self) -> impl Iterator<Item = (&Path, &EntityFailure)> {
        self.files
            .iter()
            .flat_map(|f| f.failures.iter().map(|failure| (f.source.as_path(), failure)))
    }

    pub(crate) fn failed(&self) -> usize {
        self.load_failures.len() + self.files.iter().map(|f| f.failures.len()).sum::<usize>()
    }
}

/// Load the cross-reference index from `index.xml` in `xml_dir`.
///
/// A missing index yields an empty one; references then render as plain text.
pub(crate) fn load_index(xml_dir: &Path) -> Result<Option<XrefIndex>, CliError> {
    let path = xml_dir.join(crate::scanner::INDEX_FILENAME);
    if !path.is_file() {
        return Ok(None);
    }
    let root = XmlTreeParser::new()
        .parse_file(&path)
        .map_err(|source| CliError::Tree { path, source })?;
    Ok(Some(XrefIndex::from_index(&root)))
}

/// Renders compound files with shared settings.
pub(crate) struct Pipeline<'a> {
    config: &'a RenderConfig,
    index: &'a XrefIndex,
}

impl<'a> Pipeline<'a> {
    pub(crate) fn new(config: &'a RenderConfig, index: &'a XrefIndex) -> Self {
        Self { config, index }
    }

    /// Render all `files` in parallel.
    pub(crate) fn run(&self, files: &[PathBuf]) -> RunReport {
        let results: Vec<Result<RenderedFile, FileFailure>> = files
            .par_iter()
            .map(|path| {
                self.render_file(path).map_err(|error| FileFailure {
                    source: path.clone(),
                    error,
                })
            })
            .collect();

        let mut report = RunReport::default();
        for result in results {
            match result {
                Ok(file) => report.files.push(file),
                Err(failure) => {
                    tracing::warn!(
                        file = %failure.source.display(),
                        error = %failure.error,
                        "Failed to load compound file"
                    );
                    report.load_failures.push(failure);
                }
            }
        }
        report
    }

    /// Load and render one compound file.
    pub(crate) fn render_file(&self, path: &Path) -> Result<RenderedFile, CliError> {
        let document = XmlTreeParser::new()
            .parse_file(path)
            .map_err(|source| CliError::Tree {
                path: path.to_path_buf(),
                source,
            })?;
        let compounds = load_compounds(&document);

        let mut file = RenderedFile {
            source: path.to_path_buf(),
            document: String::new(),
            rendered: 0,
            failures: Vec::new(),
        };
        let sections = compounds
            .into_iter()
            .map(|compound| self.render_compound(compound, &mut file))
            .collect::<Vec<_>>();
        file.document = sections.join("\n\n");
        if !file.document.is_empty() {
            file.document.push('\n');
        }

        tracing::info!(
            file = %path.display(),
            rendered = file.rendered,
            failed = file.failures.len(),
            "Rendered compound file"
        );
        Ok(file)
    }

    fn context(&self) -> RenderContext<'a> {
        let config = self.config;
        RenderContext::new(&config.domain)
            .with_indent(config.indent)
            .with_language(config.language())
            .with_resolver(self.index)
    }

    fn render_compound(&self, compound: Compound, file: &mut RenderedFile) -> String {
        let ctx = self.context();
        let Compound {
            name,
            mut description,
            entities,
            ..
        } = compound;

        let mut sections = vec![format!("{name}\n{}", "=".repeat(name.chars().count()))];
        match render_description(&mut description, &ctx) {
            Ok(body) if body.is_empty() => {}
            Ok(body) => sections.push(body),
            Err(error) => record(file, name.clone(), name.clone(), error),
        }

        for mut entity in entities {
            match render_entity(&mut entity, &ctx) {
                Ok(text) => {
                    sections.push(text);
                    file.rendered += 1;
                }
                Err(error) => record(file, entity.id, entity.name, error),
            }
        }
        sections.join("\n\n")
    }
}

fn record(file: &mut RenderedFile, id: String, name: String, error: EntityError) {
    tracing::warn!(
        file = %file.source.display(),
        entity = %name,
        error = %error,
        "Skipping entity"
    );
    file.failures.push(EntityFailure { id, name, error });
}

/// Directive line for the entity with its description indented below.
fn render_entity(entity: &mut Entity, ctx: &RenderContext<'_>) -> Result<String, EntityError> {
    let body = render_description(&mut entity.description, ctx)?;
    let directive = format!(
        ".. {}:{}:: {}",
        ctx.domain,
        entity.kind.directive(),
        entity.signature
    );
    if body.is_empty() {
        return Ok(directive);
    }
    Ok(format!("{directive}\n\n{}", indent(&body, ctx.indent)))
}

/// Canonicalize a `root` description tree and render its parts in order.
fn render_description(
    description: &mut TreeNode,
    ctx: &RenderContext<'_>,
) -> Result<String, EntityError> {
    let stats = canonicalize(description)?;
    if !stats.is_unchanged() {
        tracing::trace!(?stats, "Canonicalized description");
    }

    let mut blocks = Vec::new();
    for part in &description.children {
        blocks.extend(render_paragraphs(part, ctx)?);
    }
    Ok(blocks.join("\n\n"))
}
