use huenote_core::{NoteFilter, NoteRepository};

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::constants::DEFAULT_LIST_LIMIT;
use crate::helpers::parse_algorithm;
use crate::output::{note_summary_json, note_table};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;

    let mut filter = NoteFilter::new().limit(args.limit.unwrap_or(DEFAULT_LIST_LIMIT));
    if let Some(search) = args.search.as_deref() {
        filter = filter.search(search);
    }
    if let Some(algorithm) = args.algorithm.as_deref() {
        filter = filter.algorithm(parse_algorithm(algorithm)?);
    }

    let records = store.list(&filter)?;
    if args.json {
        let values: Vec<_> = records.iter().map(note_summary_json).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if records.is_empty() {
        if !ctx.quiet() {
            println!("No notes found.");
        }
        return Ok(());
    }
    println!("{}", note_table(&records));
    Ok(())
}
