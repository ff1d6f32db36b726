//! Shared helpers for the `dhconv` and `batch-convert` binaries.

use std::{fs, path::Path};

use anyhow::Context;
use dh_engine::api::parse_file_text;
use dh_engine::{Adversary, ConvertOptions, Monster, Verbosity};
use encoding_rs::Encoding;
use tracing::Level;

/// Read a text file, honouring a UTF-8/UTF-16 byte-order mark when present.
pub fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
    }
}

pub fn read_monster(path: &Path) -> anyhow::Result<Monster> {
    let text = read_text_auto(path)?;
    parse_file_text(&text, path, "monster")
}

pub fn read_adversary(path: &Path) -> anyhow::Result<Adversary> {
    let text = read_text_auto(path)?;
    parse_file_text(&text, path, "adversary")
}

pub fn read_options(path: &Path) -> anyhow::Result<ConvertOptions> {
    let text = read_text_auto(path)?;
    parse_file_text(&text, path, "options")
}

/// `-v` count wins; otherwise the config file's verbosity, else warnings only.
pub fn log_level(verbose: u8, configured: Option<Verbosity>) -> Level {
    match verbose {
        0 => match configured.unwrap_or_default() {
            Verbosity::Quiet => Level::ERROR,
            Verbosity::Normal => Level::WARN,
            Verbosity::Verbose => Level::INFO,
            Verbosity::Debug => Level::DEBUG,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the fmt subscriber on stderr so stdout stays machine-readable.
pub fn init_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_overrides_config() {
        assert_eq!(log_level(0, None), Level::WARN);
        assert_eq!(log_level(0, Some(Verbosity::Quiet)), Level::ERROR);
        assert_eq!(log_level(2, Some(Verbosity::Quiet)), Level::DEBUG);
        assert_eq!(log_level(5, None), Level::TRACE);
    }

    #[test]
    fn options_file_with_bom_reads_as_yaml() {
        let dir = std::env::temp_dir().join("dh_cli_read_options");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("opts.yaml");
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"verbosity: debug\nseed: 4\n");
        fs::write(&path, bytes).unwrap();

        let opts = read_options(&path).unwrap();
        assert_eq!(opts.verbosity, Verbosity::Debug);
        assert_eq!(opts.seed, Some(4));
    }
}
