use std::io::IsTerminal;

use dialoguer::Confirm;

use huenote_core::NoteRepository;

use crate::app::AppContext;
use crate::cli::DeleteArgs;

use super::find_note;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let record = find_note(&store, &args.id)?;

    if !args.yes && std::io::stdin().is_terminal() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete note '{}'?", record.title))
            .default(false)
            .interact()?;
        if !confirmed {
            if !ctx.quiet() {
                println!("Cancelled");
            }
            return Ok(());
        }
    }

    store.delete(&record.id)?;
    if !ctx.quiet() {
        println!("Deleted note {}", record.id);
    }
    Ok(())
}
