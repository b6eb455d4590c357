//! Configuration handling for export operations

/// Configuration for a table export
///
/// Threaded explicitly into the exporter rather than held as process-wide
/// state, so concurrent exports with different settings never interfere.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Prefix a tab to cell values that spreadsheet applications would
    /// otherwise interpret as formulas
    pub sanitize: bool,
    /// When a named field does not resolve, retry with the column title as
    /// an alternate field name (legacy dual-lookup behavior)
    pub title_field_fallback: bool,
    /// Fail the export when a named field cannot be resolved at all,
    /// instead of emitting an empty cell
    pub strict_resolution: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sanitize: true,
            title_field_fallback: true,
            strict_resolution: false,
        }
    }
}

impl ExportConfig {
    /// Create a config with the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable formula-injection sanitization
    pub fn with_sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }

    /// Enable or disable the title-as-field-name fallback lookup
    pub fn with_title_field_fallback(mut self, fallback: bool) -> Self {
        self.title_field_fallback = fallback;
        self
    }

    /// Error on unresolvable named fields instead of emitting empty cells
    pub fn with_strict_resolution(mut self, strict: bool) -> Self {
        self.strict_resolution = strict;
        self
    }
}
