use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use sitecraft_compiler::{PageTree, Site};
use sitecraft_editor::{Document, Interaction, NodeOverrides, NodeType, Property, ROOT_ID};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Source directory
    #[arg(short, long, default_value = "src")]
    pub src_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Sitecraft project...".bright_blue().bold()
    );

    // Create source directory if it doesn't exist
    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join("index.site.json");
    if !example_file.exists() {
        fs::write(&example_file, starter_site()?.to_json()?)?;
        println!("  {} Created index.site.json", "✓".green());
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/index.site.json", args.src_dir);
    println!("  2. Run: sitecraft compile");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}

/// Two linked pages, built through the editor so the trees are valid
fn starter_site() -> Result<Site> {
    let mut home = Document::new("home");
    let hero = insert(
        &mut home,
        ROOT_ID,
        NodeType::Section,
        NodeOverrides::default().with_name("Hero"),
    )?;
    insert(
        &mut home,
        &hero,
        NodeType::Text,
        NodeOverrides::default()
            .with_content("Welcome to Sitecraft")
            .with_style("fontSize", "48px"),
    )?;
    let cta = insert(
        &mut home,
        &hero,
        NodeType::Button,
        NodeOverrides::default().with_content("About us"),
    )?;
    home.update_property(
        &cta,
        Property::Interaction(Some(Interaction::NavigateToPage {
            page_id: "about".to_string(),
        })),
    );

    let mut about = Document::new("about");
    let section = insert(&mut about, ROOT_ID, NodeType::Section, NodeOverrides::default())?;
    insert(
        &mut about,
        &section,
        NodeType::Text,
        NodeOverrides::default().with_content("We build pages."),
    )?;

    Ok(Site {
        pages: vec![
            PageTree::new("home", "Home", home.into_tree()),
            PageTree::new("about", "About", about.into_tree()),
        ],
    })
}

fn insert(
    doc: &mut Document,
    parent_id: &str,
    node_type: NodeType,
    overrides: NodeOverrides,
) -> Result<String> {
    doc.insert_child(parent_id, node_type, overrides)
        .ok_or_else(|| anyhow!("Cannot insert {} into {}", node_type, parent_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_starter_site_is_linked() {
        let site = starter_site().unwrap();
        assert_eq!(site.pages.len(), 2);
        let json = site.to_json().unwrap();
        assert!(json.contains("\"kind\": \"navigateToPage\""));
        assert!(json.contains("\"pageId\": \"about\""));
    }

    #[test]
    fn test_init_does_not_overwrite_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let cwd = temp_dir.path().display().to_string();
        let config_path = temp_dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&config_path, r#"{ "srcDir": "mine" }"#).unwrap();

        init(
            InitArgs {
                src_dir: "src".to_string(),
                force: false,
            },
            &cwd,
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&config_path).unwrap(),
            r#"{ "srcDir": "mine" }"#
        );
        assert!(!temp_dir.path().join("src").exists());
    }

    #[test]
    fn test_init_writes_config_and_site() {
        let temp_dir = TempDir::new().unwrap();
        let cwd = temp_dir.path().display().to_string();

        init(
            InitArgs {
                src_dir: "pages".to_string(),
                force: false,
            },
            &cwd,
        )
        .unwrap();

        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.src_dir, "pages");
        assert!(temp_dir.path().join("pages/index.site.json").exists());
    }
}
