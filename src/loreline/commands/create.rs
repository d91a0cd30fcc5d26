use crate::commands::{clean_title, CmdMessage, CmdResult, NewNote};
use crate::error::Result;
use crate::model::{normalize_tags, sanitize_weight, Note};
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &mut S, input: NewNote) -> Result<CmdResult> {
    let title = clean_title(&input.title)?;
    let date = input.date.apply_to(&Default::default());

    let mut note = Note::new(title, input.level, date);
    if let Some(description) = input.description {
        note = note.with_description(description);
    }
    note.tags = normalize_tags(&input.tags);
    note.weight = input.weight.map(sanitize_weight).unwrap_or(note.weight);
    note.images = input.images;

    store.save_note(&note)?;
    tracing::info!(id = %note.id, level = %note.level, "note created");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Note created: {}", note.title)));
    result.affected_notes.push(note);
    Ok(result)
}
