//! Module specifier checking (TS2307).
//!
//! A compilation sees exactly one file, so a specifier resolves only when
//! the host lists it in `known_modules` or the file itself declares it with
//! `declare module "name"`. Both sources accept `*` wildcard patterns.

use tsz_parser::{NodeData, NodeIndex};

use crate::state::CheckerState;

impl<'a> CheckerState<'a> {
    /// Report TS2307 on a string-literal module specifier that does not
    /// resolve.
    pub(crate) fn check_module_specifier(&mut self, specifier: NodeIndex) {
        let Some(NodeData::Literal { text, .. }) = self.ctx.arena.data(specifier) else {
            return;
        };
        if self.is_module_resolvable(text) {
            return;
        }
        let text = text.clone();
        self.error_cannot_find_module(&text, specifier);
    }

    pub(crate) fn is_module_resolvable(&self, specifier: &str) -> bool {
        self.ctx
            .options
            .known_modules
            .iter()
            .chain(self.ctx.binder.declared_modules())
            .any(|pattern| module_pattern_matches(pattern, specifier))
    }
}

/// Match a module name pattern with at most one `*`.
pub fn module_pattern_matches(pattern: &str, specifier: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == specifier,
        Some((prefix, suffix)) => {
            specifier.len() >= prefix.len() + suffix.len()
                && specifier.starts_with(prefix)
                && specifier.ends_with(suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::module_pattern_matches;

    #[test]
    fn test_module_patterns() {
        assert!(module_pattern_matches("fs", "fs"));
        assert!(!module_pattern_matches("fs", "fs/promises"));
        assert!(module_pattern_matches("*.css", "./app.css"));
        assert!(module_pattern_matches("@app/*", "@app/util"));
        assert!(!module_pattern_matches("@app/*", "@other/util"));
        assert!(module_pattern_matches("*", "anything"));
    }
}
