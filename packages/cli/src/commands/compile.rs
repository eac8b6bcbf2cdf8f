use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use sitecraft_compiler::{compile_site, Bundle, CompileOptions, Site};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const SITE_EXTENSION: &str = ".site.json";

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Project directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let project = PathBuf::from(cwd).join(&args.path).display().to_string();
    let config = Config::load(&project)?;
    let src_dir = config.get_src_dir(&project);

    if !src_dir.exists() {
        return Err(anyhow!("Source directory does not exist: {:?}", src_dir));
    }

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(&project).join(out),
        None => config.get_out_dir(&project),
    };

    if !args.stdout {
        println!("{}", "🔨 Compiling Sitecraft sites...".bright_blue().bold());
    }

    let site_files = find_site_files(&src_dir);

    if site_files.is_empty() {
        println!("{}", "⚠️  No *.site.json files found".yellow());
        return Ok(());
    }

    if !args.stdout {
        println!("Found {} files", site_files.len());
    }

    let mut success_count = 0;
    let mut error_count = 0;

    for site_file in &site_files {
        let relative_path = site_file.strip_prefix(&src_dir).unwrap_or(site_file);
        match compile_file(site_file, &config.compiler_options) {
            Ok(bundle) if args.stdout => {
                success_count += 1;
                print_bundle(&bundle);
            }
            Ok(bundle) => {
                let target = out_dir.join(site_name(relative_path));
                write_bundle(&bundle, &target)?;
                success_count += 1;
                println!(
                    "  {} {} → {} ({} files)",
                    "✓".green(),
                    relative_path.display(),
                    target.display(),
                    bundle.len()
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    if args.stdout {
        return if error_count == 0 {
            Ok(())
        } else {
            Err(anyhow!("{} of {} sites failed to compile", error_count, site_files.len()))
        };
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Compiled {} sites successfully",
            "✅".green(),
            success_count
        );
        Ok(())
    } else {
        println!(
            "{} Compiled {} sites, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
        Err(anyhow!("{} of {} sites failed to compile", error_count, site_files.len()))
    }
}

/// All `*.site.json` files below `dir`, in path order
pub fn find_site_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(SITE_EXTENSION))
        })
        .map(|entry| entry.path().to_path_buf())
        .collect();
    files.sort();
    files
}

/// `shop/index.site.json` → `shop/index`
fn site_name(relative_path: &Path) -> PathBuf {
    let file_name = relative_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(SITE_EXTENSION).unwrap_or(file_name);
    relative_path.with_file_name(stem)
}

fn compile_file(file_path: &Path, options: &CompileOptions) -> Result<Bundle> {
    let source = fs::read_to_string(file_path)
        .with_context(|| format!("Cannot read {}", file_path.display()))?;
    let site = Site::from_json(&source)?;
    debug!(file = %file_path.display(), pages = site.pages.len(), "Loaded site");

    if site.pages.is_empty() {
        return Err(anyhow!("Site has no pages"));
    }

    Ok(compile_site(&site.pages, options)?)
}

fn print_bundle(bundle: &Bundle) {
    for (path, content) in bundle.iter() {
        println!("/* {} */", path);
        println!("{}", content);
    }
}

/// Write every file of the bundle below `target`. Nothing is written unless
/// the whole bundle compiled.
fn write_bundle(bundle: &Bundle, target: &Path) -> Result<()> {
    fs::create_dir_all(target)?;
    for (path, content) in bundle.iter() {
        let output_file = target.join(path);
        if let Some(parent) = output_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_file, content)?;
    }
    Ok(())
}
