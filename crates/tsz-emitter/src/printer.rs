//! Printer options, output, and the one-call entry point.

use tracing::{debug, debug_span};
use tsz_parser::{NodeArena, NodeIndex};

use crate::emitter::Printer;

#[derive(Clone, Debug, Default)]
pub struct PrintOptions {
    /// Append `//# sourceMappingURL=data:...` with the map and the original
    /// source inlined.
    pub inline_source_map: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrintOutput {
    pub code: String,
    /// The source map as JSON, when one was requested.
    pub source_map: Option<String>,
}

/// Print a parsed file as JavaScript.
pub fn print_source_file(
    arena: &NodeArena,
    root: NodeIndex,
    source_text: &str,
    file_name: &str,
    options: PrintOptions,
) -> PrintOutput {
    let _span = debug_span!("emit", file = file_name).entered();
    let mut printer = Printer::new(arena, options);
    printer.set_source_text(source_text);
    printer.set_file_name(file_name);
    printer.print(root);
    let output = printer.finish();
    debug!(bytes = output.code.len(), "emitted module");
    output
}

/// The JavaScript file name for a TypeScript input: `src/a.ts` -> `a.js`,
/// `b.mts` -> `b.mjs`, `c.cts` -> `c.cjs`.
pub fn output_file_name(file_name: &str) -> String {
    let base = crate::emitter::base_name(file_name);
    for (extension, replacement) in [
        (".d.ts", ".js"),
        (".mts", ".mjs"),
        (".cts", ".cjs"),
        (".tsx", ".js"),
        (".ts", ".js"),
    ] {
        if let Some(stem) = base.strip_suffix(extension) {
            return format!("{stem}{replacement}");
        }
    }
    format!("{base}.js")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("a.ts"), "a.js");
        assert_eq!(output_file_name("src/lib/b.mts"), "b.mjs");
        assert_eq!(output_file_name("C:\\x\\c.cts"), "c.cjs");
        assert_eq!(output_file_name("view.tsx"), "view.js");
        assert_eq!(output_file_name("script"), "script.js");
    }
}
