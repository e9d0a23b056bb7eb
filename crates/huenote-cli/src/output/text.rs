//! Text and table output for notes.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;

use huenote_core::NoteRecord;

use crate::ui::format::{format_datetime, single_line, truncate};
use crate::ui::UiContext;

const TITLE_WIDTH: usize = 40;

/// Table of note metadata for `list`.
pub fn note_table(records: &[NoteRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Title", "Algorithm", "Created"]);
    for record in records {
        table.add_row(vec![
            record.id.clone(),
            truncate(&single_line(&record.title), TITLE_WIDTH),
            record.algorithm.to_string(),
            format_datetime(&record.created_at),
        ]);
    }
    table
}

/// Header lines followed by the decrypted body.
pub fn print_note(ui: &UiContext, record: &NoteRecord, body: &str, quiet: bool) {
    if !quiet {
        if ui.color {
            println!("{}", record.title.bold());
        } else {
            println!("{}", record.title);
        }
        println!("id:        {}", record.id);
        println!("algorithm: {}", record.algorithm);
        println!("created:   {}", format_datetime(&record.created_at));
        if record.updated_at != record.created_at {
            println!("updated:   {}", format_datetime(&record.updated_at));
        }
        println!();
    }
    println!("{}", body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use huenote_core::{Algorithm, ColorSequence, EncryptedPayload, PaletteColor};

    #[test]
    fn test_table_lists_titles() {
        let payload =
            EncryptedPayload::new(Algorithm::Ecc, vec![1; 90], Some(vec![0; 12])).unwrap();
        let colors = ColorSequence::from_palette([
            PaletteColor::Gold,
            PaletteColor::Plum,
            PaletteColor::Pink,
        ]);
        let record = NoteRecord::assemble("n2", "Line one\nline two", colors, &payload, Utc::now());
        let rendered = note_table(&[record]).to_string();
        assert!(rendered.contains("Line one line two"));
        assert!(rendered.contains("ECC"));
    }
}
