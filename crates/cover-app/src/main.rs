// ABOUTME: Command line entry point for working with cover layouts.
// ABOUTME: Lists templates, creates pages from templates and inspects persisted layouts.

use std::path::Path;

use anyhow::{bail, Context, Result};

use cover_core::CoverSettings;
use cover_layout::{TileFilter, TileRef, UuidIds};
use cover_page::{on_added, searchable_text, Cover};
use cover_tiles::{InMemoryTiles, StripTags};

const USAGE: &str = "usage:
  cover-tool init
  cover-tool templates [--settings FILE]
  cover-tool create TEMPLATE [--id ID] [--title TITLE] [--settings FILE]
  cover-tool inspect LAYOUT_FILE [--type TILE_TYPE]...";

struct Args {
    command: String,
    target: Option<String>,
    settings: Option<String>,
    id: Option<String>,
    title: Option<String>,
    types: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        bail!("{USAGE}");
    };

    let mut parsed = Args {
        command,
        target: None,
        settings: None,
        id: None,
        title: None,
        types: Vec::new(),
    };
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().with_context(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--settings" => parsed.settings = Some(value("--settings")?),
            "--id" => parsed.id = Some(value("--id")?),
            "--title" => parsed.title = Some(value("--title")?),
            "--type" => parsed.types.push(value("--type")?),
            _ if arg.starts_with("--") => bail!("unknown option {arg}\n{USAGE}"),
            _ if parsed.target.is_none() => parsed.target = Some(arg.clone()),
            _ => bail!("unexpected argument {arg}\n{USAGE}"),
        }
    }
    Ok(parsed)
}

fn load_settings(path: Option<&str>) -> Result<CoverSettings> {
    match path {
        Some(path) => CoverSettings::load(Path::new(path))
            .with_context(|| format!("loading settings from {path}")),
        None => Ok(CoverSettings::load_or_default()),
    }
}

fn list_templates(settings: &CoverSettings) {
    for name in settings.layouts.keys() {
        println!("{name}");
    }
}

/// Tiles whose type editors cannot add under the current settings
fn unavailable_tiles(cover: &Cover, settings: &CoverSettings) -> Result<Vec<TileRef>> {
    Ok(cover
        .get_tiles(TileFilter::All)?
        .into_iter()
        .filter(|tile| !settings.is_available(&tile.tile_type))
        .collect())
}

fn create(args: &Args, settings: &CoverSettings) -> Result<()> {
    let template = args.target.as_deref().context("create needs a TEMPLATE")?;
    let id = args.id.clone().unwrap_or_else(|| "new-cover".to_string());
    let title = args.title.clone().unwrap_or_else(|| template.to_string());

    let mut cover = Cover::new(id, title).with_template(template);
    if !on_added(&mut cover, settings, &mut UuidIds)? {
        bail!("template {template:?} is not registered");
    }

    for tile in unavailable_tiles(&cover, settings)? {
        tracing::warn!("Tile {} uses unavailable type {}", tile.id, tile.tile_type);
    }
    for tile in cover.get_tiles(TileFilter::All)? {
        println!("{}  {}", tile.id, tile.tile_type);
    }
    println!("{}", cover.cover_layout.as_deref().unwrap_or("[]"));

    let tiles = InMemoryTiles::with_types(settings.available_tiles.iter().cloned());
    let text = searchable_text(&cover, &tiles, &StripTags, &settings.richtext_tile_type)?;
    println!("{text}");
    Ok(())
}

fn inspect(args: &Args) -> Result<()> {
    let path = args.target.as_deref().context("inspect needs a LAYOUT_FILE")?;
    let layout = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;

    let filter = if args.types.is_empty() {
        TileFilter::All
    } else {
        TileFilter::types(args.types.iter().cloned())
    };
    let cover = Cover::new(path, path).with_layout(layout);
    for tile in cover.get_tiles(filter)? {
        println!("{}  {}", tile.id, tile.tile_type);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = parse_args()?;
    tracing::debug!("Running {}", args.command);

    match args.command.as_str() {
        "init" => {
            let path = CoverSettings::default().save_to_default()?;
            println!("Wrote {}", path.display());
        }
        "templates" => list_templates(&load_settings(args.settings.as_deref())?),
        "create" => create(&args, &load_settings(args.settings.as_deref())?)?,
        "inspect" => inspect(&args)?,
        other => bail!("unknown command {other}\n{USAGE}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_tiles_outside_available_types() {
        let mut settings = CoverSettings::default();
        settings.available_tiles = vec!["collective.cover.richtext".to_string()];

        let mut cover = Cover::new("p", "P").with_template("Layout A");
        on_added(&mut cover, &settings, &mut UuidIds).unwrap();

        let types: Vec<_> = unavailable_tiles(&cover, &settings)
            .unwrap()
            .into_iter()
            .map(|tile| tile.tile_type)
            .collect();
        assert_eq!(types, vec!["collective.cover.basic", "collective.cover.collection"]);
    }
}
