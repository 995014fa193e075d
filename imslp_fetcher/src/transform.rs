use crate::IMSLP_WIKI_URL;

/// Display title for a page name: underscores become spaces, then everything
/// from the first '.' on is dropped.
pub fn normalize_title(page_name: &str) -> String {
    let title = page_name.replace('_', " ");
    match title.find('.') {
        Some(idx) => title[..idx].to_string(),
        None => title,
    }
}

/// Wiki URL for the untransformed page name.
pub fn imslp_link(page_name: &str) -> String {
    format!("{}{}", IMSLP_WIKI_URL, page_name)
}

/// Hands out contiguous record ids starting at 1.
#[derive(Debug)]
pub struct PieceIds {
    next: u32,
}

impl PieceIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next - 1
    }
}

impl Default for PieceIds {
    fn default() -> Self {
        Self::new()
    }
}
