use clap::CommandFactory;
use clap_complete::generate;

use huenote_core::PaletteColor;

use crate::app::AppContext;
use crate::cli::Cli;
use crate::ui::{palette_label, UiContext};

pub fn handle_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "huenote", &mut std::io::stdout());
    Ok(())
}

pub fn handle_palette(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = UiContext::from_env(ctx.quiet());
    for color in PaletteColor::ALL {
        println!("{}", palette_label(color, ui.color));
    }
    Ok(())
}
