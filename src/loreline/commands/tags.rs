use crate::commands::{CmdResult, TagCount};
use crate::error::Result;
use crate::store::DataStore;
use std::collections::BTreeMap;

/// Distinct tags with how many notes carry each, sorted by name.
pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let mut counts: BTreeMap<String, (String, usize)> = BTreeMap::new();
    for note in store.list_notes()? {
        for tag in &note.tags {
            let entry = counts
                .entry(tag.to_lowercase())
                .or_insert_with(|| (tag.clone(), 0));
            entry.1 += 1;
        }
    }

    let mut result = CmdResult::default();
    result.tags = counts
        .into_values()
        .map(|(name, count)| TagCount { name, count })
        .collect();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Granularity, TemporalPoint};
    use crate::model::Note;
    use crate::store::memory::fixtures::StoreFixture;

    fn tagged(title: &str, tags: &[&str]) -> Note {
        Note::new(title.into(), Granularity::Era, TemporalPoint::default()).with_tags(tags)
    }

    #[test]
    fn counts_tags_case_insensitively() {
        let store = StoreFixture::new()
            .with_note(tagged("A", &["war", "kings"]))
            .with_note(tagged("B", &["War"]))
            .with_note(tagged("C", &["astronomy"]))
            .store;

        let result = run(&store).unwrap();
        assert_eq!(
            result.tags,
            vec![
                TagCount { name: "astronomy".into(), count: 1 },
                TagCount { name: "kings".into(), count: 1 },
                TagCount { name: "war".into(), count: 2 },
            ]
        );
    }

    #[test]
    fn no_notes_no_tags() {
        let store = StoreFixture::new().store;
        assert!(run(&store).unwrap().tags.is_empty());
    }
}
