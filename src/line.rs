use crate::config::Markers;

/// Classification of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts a new entry; carries the key field.
    EntryStart,
    /// Page-break marker, discarded.
    PageMarker,
    /// Other `<L…` directive lines such as `<LEND>`, discarded.
    Ignored,
    /// Whitespace only, dropped silently.
    Blank,
    /// Definition text for the open entry.
    Content,
}

/// Strip the line terminator left by readers that keep it.
pub fn trim_line_end(line: &str) -> &str {
    line.trim_end_matches(|c| c == '\n' || c == '\r')
}

pub fn classify_line(line: &str, markers: &Markers) -> LineKind {
    let line = trim_line_end(line);

    if line.starts_with(&markers.entry_start) {
        return LineKind::EntryStart;
    }
    if !markers.page_marker.is_empty() && line.starts_with(&markers.page_marker) {
        return LineKind::PageMarker;
    }
    if markers
        .ignored_prefixes
        .iter()
        .any(|prefix| line.starts_with(prefix.as_str()))
    {
        return LineKind::Ignored;
    }
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    LineKind::Content
}
