use dioxus::prelude::*;
use richtext_config::Config;
use std::env;
use std::path::PathBuf;
use std::process;

mod ui;

use ui::RichTextEditor;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config_path, loaded) = match args.as_slice() {
        [_] => (Config::config_path(), Config::load()),
        [_, path] => {
            let path = PathBuf::from(path);
            let path = Config::expand_path(&path).unwrap_or(path);
            let loaded = Config::load_from_path(&path);
            (path, loaded)
        }
        _ => {
            let program_name = args
                .first()
                .cloned()
                .unwrap_or_else(|| "richtext-dioxus".to_string());
            eprintln!("Usage: {program_name} [config-file-path]");
            process::exit(1);
        }
    };

    // Config is read before logging starts so it can pick the log level
    let log_level = match &loaded {
        Ok(Some(config)) => config.log_level.clone(),
        _ => None,
    };
    init_logging(log_level.as_deref());

    log::info!("richtext starting up!");
    log::info!("Config path: {}", config_path.display());

    let config = match loaded {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", config_path.display());
            config
        }
        Ok(None) => {
            if args.len() == 2 {
                log::warn!(
                    "Config file {} not found, using defaults",
                    config_path.display()
                );
            } else {
                log::info!("No config file found, using defaults");
            }
            Config::default()
        }
        Err(e) => {
            log::error!("Loading config failed with error: {e}");
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    log::info!("About to launch Dioxus app for desktop");
    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config(&config))
        .launch(app_root);
}

fn init_logging(level: Option<&str>) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(log::LevelFilter::Info);

    let parsed = level.map(|level| (level, level.parse::<log::LevelFilter>()));
    if let Some((_, Ok(filter))) = &parsed {
        builder.filter_level(*filter);
    }
    builder.init();

    if let Some((level, Err(e))) = parsed {
        log::warn!("Ignoring log_level `{level}` from config: {e}");
    }
}

fn app_root() -> Element {
    rsx! {
        RichTextEditor {}
    }
}

fn make_window_config(config: &Config) -> dioxus::desktop::Config {
    use dioxus::desktop::{Config as WindowConfig, LogicalSize, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title(config.window_title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_always_on_top(config.always_on_top);

    WindowConfig::default().with_window(window)
}
