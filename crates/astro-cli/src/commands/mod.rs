pub mod check;
pub mod dispatch;
pub mod filter;
pub mod init;
pub mod instrument;
pub mod photometry;
pub mod publication;
pub mod schema;
pub mod source;
pub mod spectra;

use astro_config::IngestConfig;

use crate::cli::subcommands::BatchFileArgs;

/// Batch flags loosen the configured failure policy, never tighten it.
fn batch_config(configured: &IngestConfig, args: &BatchFileArgs) -> IngestConfig {
    IngestConfig {
        raise_on_error: configured.raise_on_error && !args.keep_going,
        raise_on_ambiguity: configured.raise_on_ambiguity && !args.allow_ambiguous,
        ..configured.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn keep_going_only_relaxes_item_errors() {
        let args = BatchFileArgs {
            file: PathBuf::from("sources.jsonl"),
            keep_going: true,
            allow_ambiguous: false,
        };
        let config = batch_config(&IngestConfig::default(), &args);
        assert!(!config.raise_on_error);
        assert!(config.raise_on_ambiguity);
    }

    #[test]
    fn flags_cannot_make_a_lenient_config_strict() {
        let args = BatchFileArgs {
            file: PathBuf::from("sources.jsonl"),
            keep_going: false,
            allow_ambiguous: false,
        };
        let lenient = IngestConfig {
            raise_on_error: false,
            ..IngestConfig::default()
        };
        assert!(!batch_config(&lenient, &args).raise_on_error);
    }
}
