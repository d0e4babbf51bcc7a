use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use libdevanagari_core::{ContextKey, GlyphClass, RuleFamily};
use libsanskrit::{create_engine, create_ime_engine, tables, ImeEngine, KeyEvent, Profile, SanskritConfig};

#[derive(Parser)]
#[command(name = "libsanskrit")]
#[command(about = "Phonetic Latin-keyboard composition into Devanagari")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Rule-set profile (overrides the profile fields of --config)
    #[arg(long, value_enum, global = true)]
    profile: Option<Profile>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Key sequence for quick testing
    input: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Type a key sequence and print the composed text
    Compose {
        /// Keys to type; uppercase letters are shifted
        keys: String,
        /// Print the rule class that handled each key
        #[arg(long)]
        explain: bool,
    },
    /// Interactive mode: each line is typed into a fresh buffer
    Repl,
    /// List the rule table
    Rules {
        /// Only list one family (cycle, conjunct, vriddhi, matra, swar)
        #[arg(long)]
        family: Option<String>,
    },
    /// Validate the tables and print their sizes
    Check,
    /// Print the effective configuration as TOML
    Config,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, profile: Option<Profile>) -> Result<SanskritConfig> {
    let mut config = match path {
        Some(p) => SanskritConfig::load_toml(p)
            .map_err(|e| anyhow::anyhow!("failed to load config {}: {}", p.display(), e))?,
        None => SanskritConfig::default(),
    };
    if let Some(profile) = profile {
        config.apply_profile(profile);
    }
    tracing::debug!(profile = ?config.profile, order = ?config.base.rule_order, "configuration loaded");
    Ok(config)
}

fn key_for(ch: char) -> KeyEvent {
    match ch {
        ' ' => KeyEvent::Space,
        _ => KeyEvent::char(ch),
    }
}

fn handle_compose(ime: &mut ImeEngine, keys: &str, explain: bool) {
    if !explain {
        ime.type_str(keys);
        println!("{}", ime.text());
        return;
    }
    for ch in keys.chars() {
        let result = ime.process_key(key_for(ch));
        let step = match ime.last_step() {
            Some(step) => format!("{:?}", step),
            None => format!("{:?}", result),
        };
        println!("{:>3}  {:<14} {}", ch, step, ime.text());
    }
}

fn run_repl(config: &SanskritConfig) -> Result<()> {
    let mut ime = create_ime_engine(config).context("building engine")?;
    println!("libsanskrit ({:?}): type Latin keys and press Enter", config.profile);
    println!("Example: 'kfa' for खा, 'kai' for कै");
    println!("Ctrl-D to exit.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let input = line.trim_end();
        if input.is_empty() {
            continue;
        }
        ime.reset();
        ime.type_str(input);
        println!("{}", ime.text());
    }
    Ok(())
}

fn handle_rules(config: &SanskritConfig, family: Option<&str>) -> Result<()> {
    let family = family.map(str::parse::<RuleFamily>).transpose()?;
    let rules = tables::rule_table(config)?;
    for rule in rules.rules() {
        if family.is_some_and(|f| f != rule.family) {
            continue;
        }
        let context = match &rule.context {
            ContextKey::NoContext => "(none)".to_string(),
            ContextKey::AnyConsonant => "(consonant)".to_string(),
            ContextKey::Glyph(g) => g.to_string(),
        };
        println!("{:<9} {:<12} {}  → {}", rule.family.name(), context, rule.key, rule.target);
    }
    Ok(())
}

fn handle_check(config: &SanskritConfig) -> Result<()> {
    let engine = create_engine(config).context("building engine")?;
    let symbols = engine.tables();
    let rules = engine.rules();

    println!("glyph classes:");
    for class in [
        GlyphClass::Consonant,
        GlyphClass::IndependentVowel,
        GlyphClass::Matra,
        GlyphClass::Modifier,
    ] {
        println!("  {:<17} {}", format!("{:?}", class), symbols.glyphs_of(class).len());
    }
    println!("rule families:");
    for (family, count) in rules.families() {
        println!("  {:<17} {}", family.name(), count);
    }

    let mut unclassified = 0;
    for rule in rules.rules() {
        if symbols.classify(rule.target.as_str()).is_none() {
            tracing::warn!(rule = %rule, "rule target is not in the glyph inventory");
            unclassified += 1;
        }
    }
    if unclassified > 0 {
        anyhow::bail!("{} rule target(s) outside the glyph inventory", unclassified);
    }
    println!("ok");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref(), cli.profile)?;

    match cli.command {
        Some(Commands::Compose { keys, explain }) => {
            let mut ime = create_ime_engine(&config).context("building engine")?;
            handle_compose(&mut ime, &keys, explain);
        }
        Some(Commands::Repl) => run_repl(&config)?,
        Some(Commands::Rules { family }) => handle_rules(&config, family.as_deref())?,
        Some(Commands::Check) => handle_check(&config)?,
        Some(Commands::Config) => print!("{}", config.to_toml_string()?),
        None => {
            // Bare argument composes it; nothing starts the REPL
            if let Some(input) = cli.input {
                let mut ime = create_ime_engine(&config).context("building engine")?;
                handle_compose(&mut ime, &input, false);
            } else {
                run_repl(&config)?;
            }
        }
    }
    Ok(())
}
