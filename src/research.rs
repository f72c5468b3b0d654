use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

/// Research papers published about the platform, title → file name.
///
/// `An_approach_to_describing_the_semantics_of_Hedy_2022.pdf` is listed as
/// `An approach to describing the semantics of Hedy 2022`.
pub fn list_research_papers(dir: &Path) -> BTreeMap<String, String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("No research directory at {}: {}", dir.display(), e);
            return BTreeMap::new();
        }
    };

    entries
        .flatten()
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .map(|file| (paper_title(&file), file))
        .collect()
}

fn paper_title(file: &str) -> String {
    let spaced = file.replace('_', " ");
    spaced.split('.').next().unwrap_or_default().to_string()
}
