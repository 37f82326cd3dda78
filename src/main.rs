#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

use anyhow::Context;
use iced::Theme;
use mole_scan::config::{AppConfig, WINDOW_HEIGHT, WINDOW_WIDTH};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    log::info!(
        "Endpoint {}, captures stored in {}",
        config.endpoint,
        config.storage_dir.display()
    );

    iced::application(
        move || app::App::new(config.clone()),
        app::App::update,
        app::App::view,
    )
    .title("AI Skin Analysis")
    .subscription(app::App::subscription)
    .theme(|_: &app::App| Theme::Light)
    .window(iced::window::Settings {
        size: iced::Size::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        ..Default::default()
    })
    .run()?;

    Ok(())
}
