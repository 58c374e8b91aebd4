use pathq_compiler::diagnostics::{DiagnosticKind, Diagnostics};
use rowan::TextRange;

/// Runtime failure, tied to the expression that caused it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EvalError {
    #[error("unbound variable `{name}`")]
    UnboundVariable { name: String, span: TextRange },

    #[error("type mismatch: {message}")]
    TypeMismatch { message: String, span: TextRange },

    #[error("{message}")]
    Io { message: String, span: TextRange },

    #[error("{error}")]
    Compile {
        error: pathq_compiler::Error,
        span: TextRange,
    },

    #[error("{error}")]
    Core {
        error: pathq_core::Error,
        span: TextRange,
    },

    #[error("cannot write output: {message}")]
    Output { message: String, span: TextRange },
}

impl EvalError {
    pub fn span(&self) -> TextRange {
        match self {
            EvalError::UnboundVariable { span, .. }
            | EvalError::TypeMismatch { span, .. }
            | EvalError::Io { span, .. }
            | EvalError::Compile { span, .. }
            | EvalError::Core { span, .. }
            | EvalError::Output { span, .. } => *span,
        }
    }

    /// The error as a single diagnostic over the script source.
    pub fn to_diagnostics(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        let span = self.span();
        match self {
            EvalError::UnboundVariable { name, .. } => diagnostics
                .report(DiagnosticKind::UnboundVariable, span)
                .message(format!("`{name}`"))
                .emit(),
            EvalError::TypeMismatch { message, .. } => diagnostics
                .report(DiagnosticKind::TypeMismatch, span)
                .message(message.clone())
                .emit(),
            EvalError::Compile {
                error:
                    pathq_compiler::Error::RegexParse {
                        source_text,
                        diagnostics: inner,
                    },
                ..
            } => {
                let details: Vec<&str> = inner.iter().map(|d| d.message()).collect();
                diagnostics
                    .report(DiagnosticKind::EvalFailure, span)
                    .message(format!("invalid regex `{source_text}`: {}", details.join("; ")))
                    .emit();
            }
            EvalError::Io { .. }
            | EvalError::Compile { .. }
            | EvalError::Core { .. }
            | EvalError::Output { .. } => diagnostics
                .report(DiagnosticKind::EvalFailure, span)
                .message(self.to_string())
                .emit(),
        }
        diagnostics
    }
}
