use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dbglog::{BaseLogger, DbgLogger, DebugConfig, Flags, LogFacade, config::parse_mask};
use std::{fs, path::PathBuf};

/// Prints a few lines through a debug gated logger.
///
/// Settings are read from the `DBGLOG_DEBUG`, `DBGLOG_MASK`, `DBGLOG_PREFIX`
/// & `DBGLOG_FLAGS` environment variables, then `--config`, then the flags.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// JSON config file, see `DebugConfig`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug output.
    #[arg(long)]
    debug: bool,

    /// Debug mask, decimal or 0x/0o/0b prefixed.
    #[arg(long, value_parser = parse_mask)]
    mask: Option<u64>,

    /// Line prefix.
    #[arg(long)]
    prefix: Option<String>,

    /// Header flags, e.g. "date|time|shortfile".
    #[arg(long)]
    flags: Option<Flags>,

    /// Send debug lines to the `log` facade rather than stderr.
    #[arg(long)]
    facade: bool,

    /// Emit a masked debug line for each of these bits.
    #[arg(long = "bit", value_parser = parse_mask)]
    bits: Vec<u64>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = configure(DebugConfig::from_env()?, &args)?;
    log::debug!("{config:?}");

    if args.facade {
        let log = DbgLogger::with_base(facade_for(&config.prefix));
        config.apply(&log);
        run(&log, &args.bits);
    } else {
        run(&config.build(std::io::stderr()), &args.bits);
    }
    Ok(())
}

/// Layers the `--config` file and command line flags over `config`.
fn configure(mut config: DebugConfig, args: &Args) -> anyhow::Result<DebugConfig> {
    if let Some(path) = &args.config {
        let json =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        config
            .merge_json(&json)
            .with_context(|| format!("parsing {}", path.display()))?;
    }
    config.enabled |= args.debug;
    if let Some(mask) = args.mask {
        config.mask = mask;
    }
    if let Some(prefix) = &args.prefix {
        config.prefix.clone_from(prefix);
    }
    if let Some(flags) = args.flags {
        config.flags = flags;
    }
    Ok(config)
}

/// Uses the trimmed prefix as record target, the crate name if there is none.
fn facade_for(prefix: &str) -> LogFacade {
    let target = prefix.trim();
    if target.is_empty() {
        LogFacade::default()
    } else {
        LogFacade::new(target)
    }
}

fn run<L: BaseLogger>(log: &DbgLogger<L>, bits: &[u64]) {
    log.printf(format_args!("debug={} mask={:#x}", log.is_enabled(), log.mask()));
    dbglog::debugf!(log, "debug output is enabled");
    dbglog::debug!(log, "values:", 1, 2.5, 'c');
    dbglog::debugln!(log, "line", "end");
    for &bit in bits {
        dbglog::debugf_m!(log, bit, "bit {bit:#x} is in the mask");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(env: &[(&str, &str)], argv: &[&str]) -> DebugConfig {
        let args = Args::try_parse_from([&["dbglog-demo"][..], argv].concat()).unwrap();
        let base = DebugConfig::from_vars(|name: &str| {
            env.iter().find(|(k, _)| *k == name).map(|(_, v)| v.to_string())
        })
        .unwrap();
        configure(base, &args).unwrap()
    }

    #[test]
    fn env_debug_words_enable() {
        for value in ["1", "yes", "on", "true"] {
            assert!(config(&[("DBGLOG_DEBUG", value)], &[]).enabled, "{value}");
        }
        assert!(!config(&[("DBGLOG_DEBUG", "0")], &[]).enabled);
        assert!(!config(&[], &[]).enabled);
    }

    #[test]
    fn flags_override_env() {
        let config = config(
            &[("DBGLOG_MASK", "0x1"), ("DBGLOG_PREFIX", "env ")],
            &["--debug", "--mask", "0b110", "--flags", "shortfile"],
        );
        assert!(config.enabled);
        assert_eq!(config.mask, 0b110);
        assert_eq!(config.prefix, "env ");
        assert_eq!(config.flags, Flags::SHORT_FILE);
    }

    #[test]
    fn env_debug_is_not_a_cli_value() {
        // `--debug` is a plain switch, the env var is parsed by `DebugConfig`
        assert!(Args::try_parse_from(["dbglog-demo", "--debug", "yes"]).is_err());
    }

    #[test]
    fn facade_target() {
        assert_eq!(facade_for(" net ").target(), "net");
        assert_eq!(facade_for("").target(), "dbglog");
        assert_eq!(facade_for("  ").target(), "dbglog");
    }
}
