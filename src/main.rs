use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

use menutree::{filter_terms, load_terms, render_menu, MenuOptions, OptionDefaults, RawOptions};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("menutree")
        .about("Render a flat taxonomy term list as a nested HTML menu")
        .arg(
            Arg::new("input")
                .help("Terms JSON file or http(s) URL")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("options")
                .long("options")
                .value_name("FILE")
                .help("JSON object of raw menu options"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .value_name("KEY=VALUE")
                .action(ArgAction::Append)
                .help("Set a single option, overriding the options file"),
        )
        .arg(
            Arg::new("base")
                .long("base")
                .value_name("URL")
                .default_value("")
                .help("Site base URL prepended to every link"),
        )
        .arg(
            Arg::new("category-base")
                .long("category-base")
                .value_name("SEGMENT")
                .help("Path segment for the category taxonomy (defaults to \"category\")"),
        )
        .get_matches();

    let input = matches.get_one::<String>("input").unwrap();

    let mut raw = RawOptions::new();
    if let Some(path) = matches.get_one::<String>("options") {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path))?;
        let value: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON in options file {}", path))?;
        match value {
            serde_json::Value::Object(map) => raw = map,
            _ => anyhow::bail!("Options file {} must contain a JSON object", path),
        }
    }
    if let Some(pairs) = matches.get_many::<String>("set") {
        for pair in pairs {
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("--set expects KEY=VALUE, got {}", pair))?;
            raw.insert(key.to_string(), serde_json::Value::from(value));
        }
    }

    // The renderer receives a precomputed base link: site root plus the
    // taxonomy path segment. It never computes permalink structure itself.
    let options = MenuOptions::from_raw(&raw, &OptionDefaults::base());
    let terms = load_terms(input)?;
    let terms = filter_terms(terms, &options.taxonomy, options.hide_empty);

    let base = matches.get_one::<String>("base").unwrap();
    let segment = link_segment(
        &options.taxonomy,
        matches.get_one::<String>("category-base").map(String::as_str),
    );
    let base_link = format!("{}{}", base, segment);

    let html = render_menu(&terms, &raw, &base_link, None);
    println!("{}", html);

    Ok(())
}

/// Path segment between the site root and term slugs, mirroring permalink
/// bases: the category taxonomy uses its configured base, anything else its
/// own name.
fn link_segment(taxonomy: &str, category_base: Option<&str>) -> String {
    if taxonomy == "category" {
        format!("/{}", category_base.unwrap_or("category"))
    } else {
        format!("/{}", taxonomy)
    }
}
