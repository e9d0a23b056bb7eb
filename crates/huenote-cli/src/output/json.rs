//! JSON output formatting for notes.

use huenote_core::NoteRecord;

/// Listing view: metadata only, never ciphertext or colors.
pub fn note_summary_json(record: &NoteRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id,
        "title": record.title,
        "algorithm": record.algorithm,
        "createdAt": record.created_at,
        "updatedAt": record.updated_at,
    })
}

/// Decrypted view for `show --json`.
pub fn note_body_json(record: &NoteRecord, body: &str) -> serde_json::Value {
    let mut value = note_summary_json(record);
    value["body"] = serde_json::Value::String(body.to_string());
    value
}
