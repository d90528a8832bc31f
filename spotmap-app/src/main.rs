use anyhow::Context;
use serde::Deserialize;
use spotmap::{
    location::StaticLocationProvider, prelude::*, rendering::engine::JsonLinesEngine,
};
use std::io::{self, BufRead};

/// Host-side actions that do not come from the map engine
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum HostCommand {
    Toggle3d,
    ToggleDayNight,
    ClosePopup,
    TransitionComplete { token: u64 },
}

fn parse_line(line: &str) -> anyhow::Result<std::result::Result<EngineEvent, HostCommand>> {
    if let Ok(event) = serde_json::from_str::<EngineEvent>(line) {
        return Ok(Ok(event));
    }
    let command = serde_json::from_str::<HostCommand>(line)
        .with_context(|| format!("unrecognized input: {}", line))?;
    Ok(Err(command))
}

fn load_catalog(path: Option<&String>) -> anyhow::Result<SpotCatalog> {
    let Some(path) = path else {
        return Ok(SpotCatalog::bundled()?);
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
    let catalog = if path.ends_with(".geojson") {
        SpotCatalog::from_geojson_str(&text)?
    } else {
        SpotCatalog::from_json_str(&text)?
    };
    Ok(catalog)
}

/// Headless map host.
///
/// Usage: `spotmap-app [catalog.(json|geojson)] [config.json]`
///
/// Reads one JSON object per line from stdin, either an engine event such as
/// `{"type":"marker_pressed","spot_id":"1"}` or a host command such as
/// `{"type":"toggle3d"}`, and prints the resulting map descriptor.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let catalog = load_catalog(args.first())?;
    let config = match args.get(1) {
        Some(path) => SpotMapConfig::from_file(path)?,
        None => SpotMapConfig::default(),
    };
    log::info!("loaded {} photo spots", catalog.len());

    let start = catalog
        .iter()
        .next()
        .map(|spot| spot.coordinate)
        .unwrap_or(Coordinate::new(-123.1207, 49.2827)?);
    let provider = StaticLocationProvider::at(start);

    let mut map = MapOrchestrator::new(catalog, config)?;
    let mut engine = JsonLinesEngine::new(io::stdout().lock());
    map.present(&mut engine)?;
    map.initialize(&provider).await?;
    map.present(&mut engine)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(Ok(event)) => {
                if let Err(e) = map.on_engine_event(event) {
                    log::warn!("event rejected: {}", e);
                }
            }
            Ok(Err(command)) => match command {
                HostCommand::Toggle3d => {
                    map.toggle_3d();
                }
                HostCommand::ToggleDayNight => {
                    map.toggle_day_night();
                }
                HostCommand::ClosePopup => {
                    map.close_popup();
                }
                HostCommand::TransitionComplete { token } => {
                    map.on_transition_complete(TransitionToken(token));
                }
            },
            Err(e) => {
                log::warn!("{:#}", e);
                continue;
            }
        }

        map.present(&mut engine)?;
    }

    log::info!("presented {} frames", engine.frames_written());
    Ok(())
}
