use secrecy::ExposeSecret;
use zeroize::Zeroizing;

use crate::app::{resolve_colors, resolve_passphrase, AppContext, PassphraseMode};
use crate::cli::ShowArgs;
use crate::output::{note_body_json, print_note};
use crate::ui::UiContext;

use super::find_note;

pub async fn handle_show(ctx: &AppContext<'_>, args: &ShowArgs) -> anyhow::Result<()> {
    let (store, notes) = ctx.open_notes()?;
    let record = find_note(&store, &args.id)?;

    let passphrase = resolve_passphrase(PassphraseMode::Existing, args.no_input)?;
    let colors = resolve_colors(args.colors.as_deref(), args.no_input)?;

    let body = Zeroizing::new(
        notes
            .decrypt_note(&record, passphrase.expose_secret(), colors.as_slice())
            .await?,
    );

    if args.json {
        let output = serde_json::to_string_pretty(&note_body_json(&record, &body))?;
        println!("{}", output);
    } else {
        print_note(&UiContext::from_env(ctx.quiet()), &record, &body, ctx.quiet());
    }
    Ok(())
}
