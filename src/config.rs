//! Configuration types for the cleaning pipeline.
//!
//! All behaviour is controlled through [`CleanConfig`], built via its
//! [`CleanConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share configs across tasks and to diff two runs to understand why
//! their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest. The line-range table and the
//! boilerplate stripper are both optional collaborators: absent, the
//! pipeline simply runs without front/back-matter excision or publisher
//! boilerplate removal.

use crate::error::CleanError;
use crate::paratext::ParatextTable;
use crate::pipeline::boilerplate::{BoilerplateStripper, GutenbergStripper};
use crate::progress::ProgressCallback;
use std::fmt;
use std::sync::Arc;

/// Configuration for a cleaning run.
///
/// Built via [`CleanConfig::builder()`] or using [`CleanConfig::default()`].
///
/// # Example
/// ```rust
/// use ocr2para::CleanConfig;
///
/// let config = CleanConfig::builder()
///     .concurrency(8)
///     .paratext_dir_name("paratext")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct CleanConfig {
    /// Number of documents cleaned concurrently in a batch. Default: 4.
    ///
    /// Each document's pipeline is strictly sequential, but documents are
    /// independent of each other: the only shared input is the read-only
    /// line-range table, so a batch parallelises across documents freely.
    /// The work is a mix of file I/O and an in-memory CPU pass; a handful of
    /// workers saturates a typical disk.
    pub concurrency: usize,

    /// Line-range table mapping document labels to core-text spans.
    ///
    /// `None` (default) disables front/back-matter excision entirely; this is
    /// the standard production path when no manually corrected table exists.
    /// When set, documents whose label appears in the table have their front
    /// and back matter split off and persisted to side files; documents
    /// without an entry pass through unchanged.
    pub paratext: Option<ParatextTable>,

    /// Name of the side-file directory for excised front/back matter.
    /// Default: `"paratext"`.
    ///
    /// The directory is created as a sibling of the input file's directory
    /// (for `corpus/converted/novel.txt` the side files land in
    /// `corpus/paratext/`), so a conversion tree and its paratext tree stay
    /// parallel.
    pub paratext_dir_name: String,

    /// Publisher-boilerplate stripper, invoked only when the marker phrase
    /// is detected in a document's opening text.
    ///
    /// Defaults to the built-in [`GutenbergStripper`]. Set to `None` to skip
    /// boilerplate removal even for marked documents; inject a custom
    /// implementation to handle other publishers. The contract is narrow
    /// (UTF-8 bytes in, UTF-8 bytes out), so test stubs are one-liners.
    pub boilerplate_stripper: Option<Arc<dyn BoilerplateStripper>>,

    /// Per-document progress events for batch runs. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            paratext: None,
            paratext_dir_name: "paratext".to_string(),
            boilerplate_stripper: Some(Arc::new(GutenbergStripper)),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for CleanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanConfig")
            .field("concurrency", &self.concurrency)
            .field(
                "paratext",
                &self.paratext.as_ref().map(|t| format!("{} records", t.len())),
            )
            .field("paratext_dir_name", &self.paratext_dir_name)
            .field(
                "boilerplate_stripper",
                &self
                    .boilerplate_stripper
                    .as_ref()
                    .map(|_| "<dyn BoilerplateStripper>"),
            )
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn CleanProgressCallback>"),
            )
            .finish()
    }
}

impl CleanConfig {
    /// Create a new builder for `CleanConfig`.
    pub fn builder() -> CleanConfigBuilder {
        CleanConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`CleanConfig`].
#[derive(Debug)]
pub struct CleanConfigBuilder {
    config: CleanConfig,
}

impl CleanConfigBuilder {
    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    /// Attach a loaded line-range table.
    ///
    /// Load and validate it first with [`ParatextTable::load`]; validation
    /// failures there abort the run before any document is processed.
    pub fn paratext(mut self, table: ParatextTable) -> Self {
        self.config.paratext = Some(table);
        self
    }

    pub fn paratext_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.paratext_dir_name = name.into();
        self
    }

    /// Replace the boilerplate stripper invoked on marked documents.
    pub fn boilerplate_stripper(mut self, stripper: Arc<dyn BoilerplateStripper>) -> Self {
        self.config.boilerplate_stripper = Some(stripper);
        self
    }

    /// Disable boilerplate stripping even for documents carrying the marker.
    pub fn no_boilerplate_stripper(mut self) -> Self {
        self.config.boilerplate_stripper = None;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<CleanConfig, CleanError> {
        let c = &self.config;
        if c.concurrency == 0 {
            return Err(CleanError::InvalidConfig("concurrency must be ≥ 1".into()));
        }
        if c.paratext_dir_name.is_empty() || c.paratext_dir_name.contains('/') {
            return Err(CleanError::InvalidConfig(format!(
                "paratext_dir_name must be a single path segment, got {:?}",
                c.paratext_dir_name
            )));
        }
        Ok(self.config)
    }
}
