use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

const START_MARKER: &str = "<!-- WALL-OF-APPS:START -->";
const END_MARKER: &str = "<!-- WALL-OF-APPS:END -->";

const DEFAULT_DATA: &str = "docs/wall-of-apps.json";
const DEFAULT_README: &str = "README.md";

/// Canonical labels, matched case-insensitively on input.
const PLATFORMS: &[&str] = &["iOS", "iPadOS", "macOS", "tvOS", "visionOS", "watchOS"];

const LINK_PATTERN: &str = r"^https://[^\s/]+\.[^\s]+$";

fn link_pattern() -> Result<&'static Regex> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    if let Some(pattern) = PATTERN.get() {
        return Ok(pattern);
    }
    let compiled = Regex::new(LINK_PATTERN).context("invalid link pattern")?;
    Ok(PATTERN.get_or_init(|| compiled))
}

#[derive(Parser, Debug)]
#[command(name = "wallgen")]
#[command(about = "Regenerate the Wall of Apps table in README.md")]
struct Cli {
    /// Fail instead of writing when the README is out of date.
    #[arg(long)]
    check: bool,

    #[arg(long, default_value = DEFAULT_DATA)]
    data: String,

    #[arg(long, default_value = DEFAULT_README)]
    readme: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
struct Entry {
    app: String,
    link: String,
    creator: String,
    #[serde(default)]
    platform: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Unchanged,
    Updated,
    Stale,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("wallgen: error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = workspace_root()?;
    let data = path_from_root(&root, &cli.data);
    let readme = path_from_root(&root, &cli.readme);

    match regenerate(&data, &readme, cli.check)? {
        Outcome::Unchanged => {
            println!("{} is up to date", readme.display());
            Ok(())
        }
        Outcome::Updated => {
            println!("updated {}", readme.display());
            Ok(())
        }
        Outcome::Stale => bail!(
            "{} is out of date; run `cargo run -p wallgen` to regenerate it",
            readme.display()
        ),
    }
}

fn workspace_root() -> Result<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Some(crates_dir) = manifest_dir.parent() else {
        bail!("invalid wallgen location: missing crates dir");
    };
    let Some(root) = crates_dir.parent() else {
        bail!("invalid wallgen location: missing workspace root");
    };
    Ok(root.to_path_buf())
}

fn path_from_root(root: &Path, raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn regenerate(data: &Path, readme: &Path, check: bool) -> Result<Outcome> {
    let entries = load_entries(data)?;
    let table = render_table(&entries);

    let contents =
        fs::read_to_string(readme).with_context(|| format!("failed to read {}", readme.display()))?;
    let updated = replace_section(&contents, &table)
        .with_context(|| format!("failed to update {}", readme.display()))?;

    if updated == contents {
        return Ok(Outcome::Unchanged);
    }
    if check {
        return Ok(Outcome::Stale);
    }
    fs::write(readme, updated).with_context(|| format!("failed to write {}", readme.display()))?;
    Ok(Outcome::Updated)
}

fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut entries: Vec<Entry> = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    for (index, entry) in entries.iter_mut().enumerate() {
        validate_entry(entry)
            .with_context(|| format!("invalid entry #{} in {}", index + 1, path.display()))?;
    }

    entries.sort_by(|a, b| {
        a.app
            .to_lowercase()
            .cmp(&b.app.to_lowercase())
            .then_with(|| a.app.cmp(&b.app))
    });
    Ok(entries)
}

/// Trims fields and rewrites platform labels to their canonical spelling.
fn validate_entry(entry: &mut Entry) -> Result<()> {
    entry.app = entry.app.trim().to_string();
    entry.creator = entry.creator.trim().to_string();
    entry.link = entry.link.trim().to_string();

    if entry.app.is_empty() {
        bail!("app name is empty");
    }
    if entry.creator.is_empty() {
        bail!("creator is empty for {}", entry.app);
    }
    if !link_pattern()?.is_match(&entry.link) {
        bail!("link for {} must be an https URL, got {:?}", entry.app, entry.link);
    }

    let mut platforms = Vec::with_capacity(entry.platform.len());
    for raw in &entry.platform {
        let Some(label) = PLATFORMS
            .iter()
            .find(|label| label.eq_ignore_ascii_case(raw.trim()))
        else {
            bail!(
                "unknown platform {:?} for {} (expected one of: {})",
                raw,
                entry.app,
                PLATFORMS.join(", ")
            );
        };
        if !platforms.contains(label) {
            platforms.push(*label);
        }
    }
    entry.platform = platforms.into_iter().map(str::to_string).collect();
    Ok(())
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

fn render_table(entries: &[Entry]) -> String {
    let mut out = String::from("| App | Link | Creator | Platform |\n| --- | --- | --- | --- |\n");
    for entry in entries {
        let link_label = if entry.link.starts_with("https://apps.apple.com/") {
            "App Store"
        } else {
            "Website"
        };
        out.push_str(&format!(
            "| {} | [{}]({}) | {} | {} |\n",
            escape_cell(&entry.app),
            link_label,
            entry.link,
            escape_cell(&entry.creator),
            entry.platform.join(", ")
        ));
    }
    out
}

fn replace_section(contents: &str, table: &str) -> Result<String> {
    let Some(start) = contents.find(START_MARKER) else {
        bail!("missing {START_MARKER} marker");
    };
    let body_start = start + START_MARKER.len();
    let Some(end_offset) = contents[body_start..].find(END_MARKER) else {
        bail!("missing {END_MARKER} marker after {START_MARKER}");
    };
    let body_end = body_start + end_offset;

    let mut out = String::with_capacity(contents.len() + table.len());
    out.push_str(&contents[..body_start]);
    out.push('\n');
    out.push_str(table);
    out.push_str(&contents[body_end..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(app: &str, link: &str, platform: &[&str]) -> Entry {
        Entry {
            app: app.to_string(),
            link: link.to_string(),
            creator: "Someone".to_string(),
            platform: platform.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn write_fixture(dir: &TempDir, data: &str, readme: &str) -> (PathBuf, PathBuf) {
        let data_path = dir.path().join("wall-of-apps.json");
        let readme_path = dir.path().join("README.md");
        fs::write(&data_path, data).unwrap();
        fs::write(&readme_path, readme).unwrap();
        (data_path, readme_path)
    }

    const DATA: &str = r#"[
        {"app": "zeta", "link": "https://example.com/zeta", "creator": "Z", "platform": ["ios"]},
        {"app": "Alpha", "link": "https://apps.apple.com/app/id1", "creator": "A", "platform": ["iOS", "MACOS"]}
    ]"#;

    #[test]
    fn test_validate_canonicalizes_platforms() {
        let mut e = entry(" Demo ", "https://example.com", &["ios", "VisionOS", "iOS"]);
        validate_entry(&mut e).unwrap();
        assert_eq!(e.app, "Demo");
        assert_eq!(e.platform, vec!["iOS", "visionOS"]);
    }

    #[test]
    fn test_validate_rejects_bad_entries() {
        let mut no_name = entry("  ", "https://example.com", &[]);
        assert!(validate_entry(&mut no_name).is_err());

        let mut http = entry("Demo", "http://example.com", &[]);
        let err = validate_entry(&mut http).unwrap_err();
        assert!(err.to_string().contains("https"));

        let mut android = entry("Demo", "https://example.com", &["android"]);
        let err = validate_entry(&mut android).unwrap_err();
        assert!(err.to_string().contains("unknown platform"));
    }

    #[test]
    fn test_link_pattern_is_compiled_once() {
        let first = link_pattern().unwrap();
        let second = link_pattern().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(first.is_match("https://apps.apple.com/app/id1"));
        assert!(!first.is_match("https://localhost"));
    }

    #[test]
    fn test_render_table_escapes_pipes() {
        let mut e = entry("A | B", "https://apps.apple.com/app/id1", &["iOS"]);
        validate_entry(&mut e).unwrap();
        let table = render_table(&[e]);
        assert_eq!(
            table,
            "| App | Link | Creator | Platform |\n\
             | --- | --- | --- | --- |\n\
             | A \\| B | [App Store](https://apps.apple.com/app/id1) | Someone | iOS |\n"
        );
    }

    #[test]
    fn test_replace_section_keeps_surrounding_text() {
        let readme = format!("# Title\n\n{START_MARKER}\nold\n{END_MARKER}\n\nFooter\n");
        let out = replace_section(&readme, "new\n").unwrap();
        assert_eq!(out, format!("# Title\n\n{START_MARKER}\nnew\n{END_MARKER}\n\nFooter\n"));
    }

    #[test]
    fn test_replace_section_requires_markers() {
        assert!(replace_section("no markers here", "x").is_err());
        let err = replace_section(&format!("{START_MARKER} only"), "x").unwrap_err();
        assert!(err.to_string().contains("WALL-OF-APPS:END"));
    }

    #[test]
    fn test_regenerate_sorts_and_writes() {
        let dir = TempDir::new().unwrap();
        let readme = format!("intro\n{START_MARKER}\n{END_MARKER}\n");
        let (data, readme_path) = write_fixture(&dir, DATA, &readme);

        assert_eq!(regenerate(&data, &readme_path, false).unwrap(), Outcome::Updated);
        let written = fs::read_to_string(&readme_path).unwrap();
        let alpha = written.find("| Alpha |").unwrap();
        let zeta = written.find("| zeta |").unwrap();
        assert!(alpha < zeta);
        assert!(written.contains("| iOS, macOS |"));

        assert_eq!(regenerate(&data, &readme_path, true).unwrap(), Outcome::Unchanged);
    }

    #[test]
    fn test_check_reports_stale_without_writing() {
        let dir = TempDir::new().unwrap();
        let readme = format!("{START_MARKER}\nstale\n{END_MARKER}\n");
        let (data, readme_path) = write_fixture(&dir, DATA, &readme);

        assert_eq!(regenerate(&data, &readme_path, true).unwrap(), Outcome::Stale);
        assert_eq!(fs::read_to_string(&readme_path).unwrap(), readme);
    }
}
