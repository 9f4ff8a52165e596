pub use cmdlang_diagnostics::{Diagnostic, Severity, Span, caret_lines, codes, explain};
