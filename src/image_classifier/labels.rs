use crate::error::{Error, Result};
use std::path::Path;

pub fn load_labels(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let labels = parse_labels(&text);
    if labels.is_empty() {
        return Err(Error::Labels {
            path: path.to_path_buf(),
            reason: "no labels found".to_string(),
        });
    }

    Ok(labels)
}

/// One label per line. Lines in synset form (`n01440764 tench, Tinca tinca`)
/// keep only the human readable part.
pub fn parse_labels(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_synset_id(line).to_string())
        .collect()
}

fn strip_synset_id(line: &str) -> &str {
    match line.split_once(' ') {
        Some((id, rest))
            if id.len() == 9
                && id.starts_with('n')
                && id[1..].chars().all(|c| c.is_ascii_digit()) =>
        {
            rest.trim_start()
        }
        _ => line,
    }
}
