use secrecy::ExposeSecret;

use huenote_core::{NoteRepository, PrivateKeyVault};

use crate::app::{resolve_colors, resolve_passphrase, AppContext, PassphraseMode};
use crate::cli::WriteArgs;
use crate::helpers::{parse_algorithm, read_note_body};
use crate::ui::{spinner, UiContext};

pub async fn handle_write(ctx: &AppContext<'_>, args: &WriteArgs) -> anyhow::Result<()> {
    let (store, notes) = ctx.open_notes()?;
    let algorithm = match args.algorithm.as_deref() {
        Some(value) => parse_algorithm(value)?,
        None => ctx.default_algorithm(),
    };

    let body = read_note_body(args.body.as_deref(), args.no_input)?;
    let passphrase = resolve_passphrase(PassphraseMode::New, args.no_input)?;
    let colors = resolve_colors(args.colors.as_deref(), args.no_input)?;

    let ui = UiContext::from_env(ctx.quiet());
    let progress = spinner(&ui, &format!("Encrypting with {}", algorithm));
    let result = notes
        .encrypt_note(
            &args.title,
            &body,
            passphrase.expose_secret(),
            colors.as_slice(),
            algorithm,
        )
        .await;
    progress.finish_and_clear();
    let record = result?;

    if let Err(err) = store.create(&record) {
        // The wrapped key is written first; don't leave it behind.
        if let Err(cleanup) = store.remove_key(&record.id) {
            tracing::warn!(note_id = %record.id, error = %cleanup, "failed to remove orphaned key");
        }
        return Err(err.into());
    }

    if ctx.quiet() {
        println!("{}", record.id);
    } else {
        println!("Saved note {} ({})", record.id, record.algorithm);
    }
    Ok(())
}
