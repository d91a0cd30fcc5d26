use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LorelineError, Result};
use crate::model::Note;
use crate::store::DataStore;
use crate::timeline::{build_export_text, sort_notes, ExportGroupBy, ExportOptions};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::get::{filtered_notes, NoteFilter};

const ARCHIVE_TIMELINE_ENTRY: &str = "loreline/timeline.txt";

/// Where exported text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    Stdout,
    Text(PathBuf),
    Archive(PathBuf),
}

impl ExportTarget {
    /// `.tar.gz`/`.tgz` paths become archives, any other path a text file.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            None => ExportTarget::Stdout,
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
                    ExportTarget::Archive(path)
                } else {
                    ExportTarget::Text(path)
                }
            }
        }
    }
}

pub fn run<S: DataStore>(
    store: &S,
    filter: &NoteFilter,
    options: &ExportOptions,
    target: ExportTarget,
) -> Result<CmdResult> {
    let notes = filtered_notes(store, filter)?;
    let mut result = CmdResult::default();

    if notes.is_empty() {
        result.add_message(CmdMessage::info("No notes to export."));
        return Ok(result);
    }

    let calendar = store.load_calendar()?;
    let text = build_export_text(&notes, &calendar, options);

    match target {
        ExportTarget::Stdout => {
            result.export_text = Some(text);
        }
        ExportTarget::Text(path) => {
            fs::write(&path, format!("{}\n", text)).map_err(LorelineError::Io)?;
            tracing::info!(path = %path.display(), count = notes.len(), "exported text");
            result.add_message(CmdMessage::success(format!(
                "Exported {} notes to {}",
                notes.len(),
                path.display()
            )));
            result.export_path = Some(path);
        }
        ExportTarget::Archive(path) => {
            // One note per file, so group headers would be noise.
            let note_options = ExportOptions {
                group_by: ExportGroupBy::None,
                ..*options
            };
            let file = File::create(&path).map_err(LorelineError::Io)?;
            write_archive(file, &text, &notes, |note| {
                build_export_text([note], &calendar, &note_options)
            })?;
            tracing::info!(path = %path.display(), count = notes.len(), "exported archive");
            result.add_message(CmdMessage::success(format!(
                "Exported {} notes to {}",
                notes.len(),
                path.display()
            )));
            result.export_path = Some(path);
        }
    }

    Ok(result)
}

fn write_archive<W, F>(writer: W, timeline: &str, notes: &[Note], render: F) -> Result<()>
where
    W: Write,
    F: Fn(&Note) -> String,
{
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    append_text(&mut tar, ARCHIVE_TIMELINE_ENTRY, timeline)?;

    let mut sorted: Vec<&Note> = notes.iter().collect();
    sort_notes(&mut sorted);
    for (position, note) in sorted.into_iter().enumerate() {
        let entry_name = format!(
            "loreline/notes/{:03}-{}-{}.txt",
            position + 1,
            sanitize_filename(&note.title),
            &note.id.to_string()[..8]
        );
        append_text(&mut tar, &entry_name, &render(note))?;
    }

    tar.into_inner()
        .map_err(LorelineError::Io)?
        .finish()
        .map_err(LorelineError::Io)?;
    Ok(())
}

fn append_text<W: Write>(tar: &mut tar::Builder<W>, name: &str, text: &str) -> Result<()> {
    let content = format!("{}\n", text);
    let mut header = tar::Header::new_gnu();
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    tar.append_data(&mut header, Path::new(name), content.as_bytes())
        .map_err(LorelineError::Io)
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Relative;
    use crate::store::memory::fixtures::StoreFixture;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn store() -> crate::store::memory::InMemoryStore {
        StoreFixture::new()
            .with_year("Founding", 5, Relative::After)
            .with_year("Old War", 20, Relative::Before)
            .store
    }

    #[test]
    fn stdout_target_returns_text() {
        let result = run(
            &store(),
            &NoteFilter::default(),
            &ExportOptions::default(),
            ExportTarget::Stdout,
        )
        .unwrap();
        assert_eq!(
            result.export_text.as_deref(),
            Some("20 a.U.\nOld War\n\n5\nFounding")
        );
        assert!(result.export_path.is_none());
    }

    #[test]
    fn empty_selection_exports_nothing() {
        let filter = NoteFilter {
            search_term: Some("nothing like this".into()),
            ..Default::default()
        };
        let result = run(
            &store(),
            &filter,
            &ExportOptions::default(),
            ExportTarget::Stdout,
        )
        .unwrap();
        assert!(result.export_text.is_none());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn text_target_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.txt");
        let result = run(
            &store(),
            &NoteFilter::default(),
            &ExportOptions::default(),
            ExportTarget::Text(path.clone()),
        )
        .unwrap();
        assert_eq!(result.export_path.as_deref(), Some(path.as_path()));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("20 a.U.\nOld War"));
    }

    #[test]
    fn archive_holds_timeline_and_one_file_per_note() {
        let notes = store().list_notes().unwrap();
        let mut buf = Vec::new();
        write_archive(&mut buf, "whole timeline", &notes, |n| n.title.clone()).unwrap();
        assert_eq!(&buf[..2], &[0x1f, 0x8b]);

        let mut archive = tar::Archive::new(GzDecoder::new(buf.as_slice()));
        let mut entries = Vec::new();
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            let name = entry.path().unwrap().to_string_lossy().into_owned();
            let mut body = String::new();
            entry.read_to_string(&mut body).unwrap();
            entries.push((name, body));
        }

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, "loreline/timeline.txt");
        assert_eq!(entries[0].1, "whole timeline\n");
        assert!(entries[1].0.starts_with("loreline/notes/001-Old War-"));
        assert_eq!(entries[1].1, "Old War\n");
        assert!(entries[2].0.starts_with("loreline/notes/002-Founding-"));
    }

    #[test]
    fn grouped_archive_keeps_headers_out_of_note_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lore.tar.gz");
        let options = ExportOptions {
            group_by: ExportGroupBy::Era,
            ..Default::default()
        };
        run(
            &store(),
            &NoteFilter::default(),
            &options,
            ExportTarget::Archive(path.clone()),
        )
        .unwrap();

        let file = File::open(&path).unwrap();
        let mut archive = tar::Archive::new(GzDecoder::new(file));
        let mut bodies = Vec::new();
        for entry in archive.entries().unwrap() {
            let mut body = String::new();
            entry.unwrap().read_to_string(&mut body).unwrap();
            bodies.push(body);
        }

        assert_eq!(bodies.len(), 3);
        assert!(bodies[0].starts_with("Sem Era\n20 a.U.\nOld War"));
        assert_eq!(bodies[1], "20 a.U.\nOld War\n");
        assert_eq!(bodies[2], "5\nFounding\n");
    }

    #[test]
    fn target_from_path() {
        assert_eq!(ExportTarget::from_path(None), ExportTarget::Stdout);
        assert!(matches!(
            ExportTarget::from_path(Some("out/Lore.TAR.GZ".into())),
            ExportTarget::Archive(_)
        ));
        assert!(matches!(
            ExportTarget::from_path(Some("out/lore.txt".into())),
            ExportTarget::Text(_)
        ));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_filename("Old War"), "Old War");
        assert_eq!(sanitize_filename("a/b\\c"), "a_b_c");
    }
}
