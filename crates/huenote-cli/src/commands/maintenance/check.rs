use crate::app::AppContext;
use crate::errors::CliError;

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    match store.check_integrity() {
        Ok(report) => {
            if !ctx.quiet() {
                println!("Integrity check: OK");
                println!("- notes: {}", report.notes);
                println!("- wrapped keys: {}", report.wrapped_keys);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("Integrity check: FAILED");
            eprintln!("- error: {}", err);
            Err(CliError::integrity_failed(
                "Integrity check failed",
                "Hint: Restore from an export before making further changes.",
            )
            .into())
        }
    }
}
