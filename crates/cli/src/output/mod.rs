pub mod json;
pub mod terminal;

/// Output format selected by flag or configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Terminal,
    Json,
}

/// Resolve the effective format: CLI flag wins over the config file
pub fn resolve_format(flag: Option<Format>, configured: &str) -> Format {
    if let Some(format) = flag {
        return format;
    }

    match configured {
        "json" => Format::Json,
        _ => Format::Terminal,
    }
}
