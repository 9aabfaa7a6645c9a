use clap::Subcommand;
use errbridge_core::{CocoaCode, ErrorBuilder, PlatformError, TranslationConfig};
use std::path::PathBuf;

/// What to explain
#[derive(Debug, Clone, Subcommand)]
pub enum Explain {
    #[command(about = "Explain a legacy status code")]
    Status {
        #[arg(help = "Status code, e.g. -43", allow_negative_numbers = true)]
        code: i32,

        #[arg(long, help = "Treat the failing operation as a write")]
        write: bool,

        #[arg(long, help = "Path the operation was working on")]
        path: Option<PathBuf>,

        #[arg(long, help = "Description to attach")]
        description: Option<String>,
    },

    #[command(about = "Explain a POSIX errno value")]
    Errno {
        #[arg(help = "errno value, e.g. 2")]
        code: i32,

        #[arg(long, help = "Treat the failing operation as a write")]
        write: bool,

        #[arg(long, help = "Path the operation was working on")]
        path: Option<PathBuf>,
    },

    #[command(about = "Explain an HTTP status")]
    Http {
        #[arg(help = "HTTP status, e.g. 404")]
        status: u16,
    },

    #[command(about = "Explain a structured (Cocoa) error code")]
    Cocoa {
        #[arg(help = "Cocoa error code, e.g. 260", allow_negative_numbers = true)]
        code: i64,

        #[arg(long, help = "Path the operation was working on")]
        path: Option<PathBuf>,
    },

    #[command(about = "Explain a code from any domain")]
    Generic {
        #[arg(help = "Error domain, e.g. NSPOSIXErrorDomain")]
        domain: String,

        #[arg(help = "Error code", allow_negative_numbers = true)]
        code: i64,
    },
}

impl Explain {
    pub fn build_error(&self, config: &TranslationConfig) -> PlatformError {
        match self {
            Explain::Status {
                code,
                write,
                path,
                description,
            } => {
                let mut builder = ErrorBuilder::status(*code).write(*write).config(config);
                if let Some(path) = path {
                    builder = builder.path(path.clone());
                }
                if let Some(description) = description {
                    builder = builder.description(description.clone());
                }
                builder.build()
            }
            Explain::Errno { code, write, path } => {
                let mut builder = ErrorBuilder::errno(*code).write(*write).config(config);
                if let Some(path) = path {
                    builder = builder.path(path.clone());
                }
                builder.build()
            }
            Explain::Http { status } => ErrorBuilder::http(*status),
            Explain::Cocoa { code, path } => {
                let mut builder = ErrorBuilder::cocoa(CocoaCode(*code));
                if let Some(path) = path {
                    builder = builder.path(path.clone());
                }
                builder.build()
            }
            Explain::Generic { domain, code } => ErrorBuilder::generic(domain.clone(), *code).build(),
        }
    }
}
