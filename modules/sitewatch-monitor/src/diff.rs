//! Pure comparison logic between the prior snapshot and the current
//! observation.

use std::collections::HashSet;

/// True when the current title differs from the previously recorded one.
/// `None` (no observation) is a valid value on either side.
pub fn title_changed(previous: Option<&str>, current: Option<&str>) -> bool {
    previous != current
}

/// Case-insensitive substring scan of `text` against the watchlist.
/// Returns every keyword that matches.
pub fn keyword_hits<'a>(text: &str, keywords: &'a [String]) -> Vec<&'a str> {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| haystack.contains(&k.to_lowercase()))
        .map(String::as_str)
        .collect()
}

/// Headlines not yet present in `known`, in observed order. Novel
/// headlines are inserted into `known` as they are found, so a batch that
/// repeats a headline reports it once.
pub fn novel_headlines(known: &mut HashSet<String>, observed: &[String]) -> Vec<String> {
    observed
        .iter()
        .filter(|h| known.insert((*h).clone()))
        .cloned()
        .collect()
}
