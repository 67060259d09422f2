mod app;
mod audio;
mod auth;
mod carousel;
mod config;
mod library;
mod mpris;
mod player;
mod profile;
mod runtime;
mod store;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
