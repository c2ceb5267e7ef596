//! Plain-text export of a finished draft.
//!
//! The draft is laid out as fixed-width pages: an upper-cased title heading,
//! the word-wrapped body, and a `Page n of m` footer. Pages are separated by
//! form feeds so printers and pagers break them correctly.

use std::fs;
use std::path::{Path, PathBuf};

use lawzy_core::DocumentDraft;
use tracing::info;

pub const PAGE_WIDTH: usize = 80;
pub const LINES_PER_PAGE: usize = 54;

const FORM_FEED: char = '\u{000C}';
// Blank line + footer.
const FOOTER_LINES: usize = 2;

/// File stem for a document title: whitespace runs become `_`, characters
/// that are unsafe in file names are dropped.
pub fn slugify(title: &str) -> String {
    let joined = title.split_whitespace().collect::<Vec<_>>().join("_");
    let slug: String = joined
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .filter(|c| !c.is_control())
        .collect();
    if slug.is_empty() {
        "document".to_string()
    } else {
        slug
    }
}

/// Greedy word wrap. Blank input lines are kept as paragraph breaks and
/// words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            out.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                out.push(word.drain(..width).collect());
            }
            let word: String = word.into_iter().collect();
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > width {
                out.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    out
}

/// Lay out `draft` into pages of at most `lines_per_page` lines each.
pub fn paginate(draft: &DocumentDraft, width: usize, lines_per_page: usize) -> Vec<String> {
    let body_lines = lines_per_page.saturating_sub(FOOTER_LINES).max(1);

    let mut lines = wrap(&draft.title.to_uppercase(), width);
    lines.push(String::new());
    lines.extend(wrap(&draft.content, width));

    let chunks: Vec<&[String]> = lines.chunks(body_lines).collect();
    let total = chunks.len();
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut page = chunk.join("\n");
            page.push_str(&format!("\n\nPage {} of {}", i + 1, total));
            page
        })
        .collect()
}

/// Write `draft` to `<dir>/<slug>.txt`, returning the path.
pub fn export_draft(draft: &DocumentDraft, dir: &Path) -> std::io::Result<PathBuf> {
    let pages = paginate(draft, PAGE_WIDTH, LINES_PER_PAGE);
    let path = dir.join(format!("{}.txt", slugify(&draft.title)));
    let separator = format!("\n{FORM_FEED}");
    let mut body = pages.join(&separator);
    body.push('\n');
    fs::write(&path, body)?;
    info!(
        path = %path.display(),
        pages = pages.len(),
        exported_at = %chrono::Local::now().to_rfc3339(),
        "draft exported"
    );
    Ok(path)
}
