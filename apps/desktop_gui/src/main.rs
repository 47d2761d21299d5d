use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context as _;
use card_stack::{
    round::{MIN_PLAYERS, MIN_SPIES},
    RoundSetup,
};
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::DealerCommand;
use crate::controller::events::UiEvent;
use crate::ui::{app::load_persisted_setup, theme, CardTableApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "desktop_gui", about = "Pass-and-play role cards for a game of Spy")]
struct Args {
    #[arg(long, default_value_t = MIN_PLAYERS)]
    players: usize,
    #[arg(long, default_value_t = MIN_SPIES)]
    spies: usize,
    /// Show spies the category of the secret word.
    #[arg(long)]
    hints: bool,
    #[arg(long, default_value = "Places")]
    category: String,
    #[arg(long, default_value = "Library")]
    word: String,
    /// Open the how-to-play deck instead of dealing a round.
    #[arg(long)]
    how_to_play: bool,
    /// Engine tuning file; `card_stack.toml` in the working directory is used when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    /// Round settings given on the command line, if any differ from the defaults.
    fn explicit_setup(&self) -> Option<RoundSetup> {
        let setup = RoundSetup {
            player_count: self.players,
            spy_count: self.spies,
            show_hints: self.hints,
            category: self.category.clone(),
            secret_word: self.word.clone(),
        };
        (setup != RoundSetup::default()).then_some(setup)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let config = card_stack::load_config(args.config.as_deref())
        .context("failed to load card stack config")?;
    let explicit_setup = args.explicit_setup();
    if let Some(setup) = &explicit_setup {
        setup.validate().context("invalid round settings")?;
    }

    let (cmd_tx, cmd_rx) = bounded::<DealerCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Spy - Role Cards")
            .with_inner_size([480.0, 860.0])
            .with_min_inner_size([360.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Spy - Role Cards",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(theme::table_visuals());
            let setup = explicit_setup
                .or_else(|| load_persisted_setup(cc.storage))
                .unwrap_or_default();
            let startup = StartupConfig {
                setup,
                seed: args.seed,
                how_to_play: args.how_to_play,
            };
            Ok(Box::new(CardTableApp::new(cmd_tx, ui_tx, ui_rx, config, startup)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop gui exited with error: {err}"))
}
