//! The recall-then-write pipeline.
//!
//! [`Engine::recall`] resolves every variant of every file template into
//! bytes before anything touches the output tree. [`Engine::write_files`]
//! then resolves each variant's path and writes it, stopping at the first
//! failure. Files written before a failure are left in place.


use crate::chain::InheritanceChain;
use crate::document::FileTemplate;
use crate::error::{ConjureError, Result};
use crate::expand::expand_variants;
use crate::fs::atomic_write;
use crate::output::resolve_path;
use crate::settings::EngineSettings;
use crate::substitute::substitute;
use std::path::PathBuf;
use tracing::{debug, info};

/// One resolved output artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Id of the file template this variant came from.
    pub file_id: String,
    /// Tag context; empty when untagged.
    pub tag: String,
    /// Output file name with tag tokens stripped.
    pub base_name: String,
    /// Substituted content.
    pub bytes: Vec<u8>,
}

/// Runs a chain through expansion, substitution and writing.
#[derive(Debug)]
pub struct Engine<'a> {
    chain: &'a InheritanceChain,
    settings: &'a EngineSettings,
}

impl<'a> Engine<'a> {
    pub fn new(chain: &'a InheritanceChain, settings: &'a EngineSettings) -> Self {
        Self { chain, settings }
    }

    /// Resolve the bytes of every variant, in file then variant order.
    ///
    /// Each template is read at most once. Every variant starts from a fresh
    /// copy of those bytes.
    pub fn recall(&self) -> Result<Vec<Variant>> {
        let mut variants = Vec::new();

        for plan in expand_variants(self.chain) {
            let mut source: Option<Vec<u8>> = None;

            for tag in plan.tags {
                let original = match source.take() {
                    Some(bytes) => bytes,
                    None => self.read_template(plan.file)?,
                };

                let bytes = substitute(self.chain, original.clone(), &tag, self.settings.format)?;
                source = Some(original);
                debug!(file = %plan.file.id, tag = %tag, bytes = bytes.len(), "recalled variant");

                variants.push(Variant {
                    file_id: plan.file.id.clone(),
                    tag,
                    base_name: plan.base_name.clone(),
                    bytes,
                });
            }
        }

        info!(variants = variants.len(), "recalled all variants");
        Ok(variants)
    }

    /// Output path of every variant, relative paths joined onto the output root.
    pub fn output_paths(&self, variants: &[Variant]) -> Result<Vec<PathBuf>> {
        variants
            .iter()
            .map(|variant| -> Result<PathBuf> {
                Ok(self.settings.output_root.join(resolve_path(self.chain, variant)?))
            })
            .collect()
    }

    /// Write every variant, returning the paths written.
    ///
    /// The first failing variant aborts the run; earlier outputs stay written.
    pub fn write_files(&self, variants: &[Variant]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(variants.len());

        for variant in variants {
            let target = self
                .settings
                .output_root
                .join(resolve_path(self.chain, variant)?);
            atomic_write(&target, &variant.bytes)?;
            debug!(file = %variant.file_id, path = %target.display(), "wrote variant");
            written.push(target);
        }

        info!(files = written.len(), "wrote all variants");
        Ok(written)
    }

    fn read_template(&self, file: &FileTemplate) -> Result<Vec<u8>> {
        let path = self.settings.template_root.join(&file.path);
        std::fs::read(&path).map_err(|e| {
            ConjureError::Load(format!(
                "failed to read template for file `{}` at '{}': {}",
                file.id,
                path.display(),
                e
            ))
        })
    }
}
