//! CLI entry point for heft

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use heft::{
    IndicatifProgress, RenderConfig, ScanConfig, ScanOutcome, Scanner, TreeRenderer, cache,
    print_json, tree,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "heft")]
#[command(about = "A tree command that shows which directories are eating your disk")]
#[command(version)]
struct Args {
    /// Directory to analyze (defaults to the home directory)
    path: Option<PathBuf>,

    /// Descend N levels deep when printing
    #[arg(short = 'L', long = "level", default_value = "2")]
    level: usize,

    /// Show at most N children per directory, largest first (0 = all)
    #[arg(short = 'n', long = "top", default_value = "2")]
    top: usize,

    /// Jump to the named subtree (full path or final path segment)
    #[arg(long = "find", value_name = "NAME")]
    find: Option<String>,

    /// Rescan the filesystem instead of reusing the cache
    #[arg(long = "rebuild-cache")]
    rebuild_cache: bool,

    /// Omit entries smaller than SIZE from the cache (e.g. 5M, 100K)
    #[arg(long = "threshold", value_name = "SIZE", default_value = "0")]
    threshold: String,

    /// Ignore entries matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Output the resolved tree in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Suppress the scan progress bar
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

/// Parse a file size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
fn parse_file_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    Ok(num * multiplier)
}

/// Where the cache for `root` lives: a file under the platform cache
/// directory, keyed by the root's name plus a hash of its absolute path
/// so distinct roots never collide.
fn cache_path_for(root: &Path) -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .context("could not determine cache directory")?
        .join("heft");

    let abs_root = fs::canonicalize(root)
        .with_context(|| format!("could not resolve path: {}", root.display()))?;
    let name = abs_root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("root");
    let mut hasher = DefaultHasher::new();
    abs_root.hash(&mut hasher);
    let hash = hasher.finish();

    Ok(cache_dir.join(format!("{}_{:016x}.txt", name, hash)))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let threshold = parse_file_size(&args.threshold).unwrap_or_else(|e| {
        eprintln!("heft: invalid --threshold '{}': {}", args.threshold, e);
        process::exit(1);
    });

    let root_path = match args.path {
        Some(ref p) => p.clone(),
        None => dirs::home_dir().context("could not determine home directory")?,
    };

    let cache_path = cache_path_for(&root_path)?;

    if args.rebuild_cache || !cache_path.exists() {
        let config = ScanConfig {
            root: root_path.clone(),
            ignore_patterns: args.ignore.clone(),
        };
        let mut scanner = Scanner::new(config);
        if !args.quiet {
            scanner = scanner.with_progress(Box::new(IndicatifProgress));
        }
        let ScanOutcome { mut root, skipped } = scanner.scan()?;
        if skipped > 0 {
            eprintln!("heft: warning: skipped {} unreadable entries", skipped);
        }
        let encoded = cache::serialize(&mut root, threshold);
        cache::save(&cache_path, &encoded)?;
    }

    let contents = cache::load(&cache_path)?;
    let mut root = cache::deserialize(&contents)?;

    let target = match &args.find {
        Some(name) => match tree::find(&mut root, name) {
            Some(node) => node,
            None => {
                eprintln!(
                    "heft: no entry named '{}' under {}",
                    name,
                    root_path.display()
                );
                return Ok(());
            }
        },
        None => &mut root,
    };

    if args.json {
        print_json(target)?;
    } else {
        let renderer = TreeRenderer::new(RenderConfig {
            max_depth: args.level,
            top: if args.top == 0 { None } else { Some(args.top) },
            use_color: should_use_color(args.color),
        });
        renderer.print(target)?;
    }

    Ok(())
}
