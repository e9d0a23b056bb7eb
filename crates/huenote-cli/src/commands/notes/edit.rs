use secrecy::ExposeSecret;

use huenote_core::NoteRepository;

use crate::app::{resolve_colors, resolve_passphrase, AppContext, PassphraseMode};
use crate::cli::EditArgs;
use crate::helpers::read_note_body;

use super::find_note;

pub async fn handle_edit(ctx: &AppContext<'_>, args: &EditArgs) -> anyhow::Result<()> {
    let (store, notes) = ctx.open_notes()?;
    let record = find_note(&store, &args.id)?;

    let body = read_note_body(args.body.as_deref(), args.no_input)?;
    let passphrase = resolve_passphrase(PassphraseMode::Existing, args.no_input)?;
    let colors = resolve_colors(args.colors.as_deref(), args.no_input)?;

    let updated = notes
        .reencrypt_note(&record, &body, passphrase.expose_secret(), colors.as_slice())
        .await?;
    store.update(&updated)?;

    if !ctx.quiet() {
        println!("Updated note {}", updated.id);
    }
    Ok(())
}
