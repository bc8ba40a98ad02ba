//! Reserved element names.
//!
//! These names belong to dedicated grammar rule families, so the tag-name
//! scanner must never report them as ordinary start or end tag names.
//! Changing this list is a breaking grammar change.
//!
//! Lookup is case-sensitive and exact-length: `Wxs` and `wxss` are ordinary
//! tag names.

/// Structurally significant element name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReservedWord {
    Template,
    Slot,
    Block,
    Import,
    Include,
    Wxs,
}

/// Length of the longest reserved word. Longer names are rejected without
/// any comparison.
pub const MAX_RESERVED_LEN: usize = 8;

impl ReservedWord {
    pub const ALL: [ReservedWord; 6] = [
        ReservedWord::Template,
        ReservedWord::Slot,
        ReservedWord::Block,
        ReservedWord::Import,
        ReservedWord::Include,
        ReservedWord::Wxs,
    ];

    /// Source text of the reserved word.
    pub const fn as_str(self) -> &'static str {
        match self {
            ReservedWord::Template => "template",
            ReservedWord::Slot => "slot",
            ReservedWord::Block => "block",
            ReservedWord::Import => "import",
            ReservedWord::Include => "include",
            ReservedWord::Wxs => "wxs",
        }
    }
}

/// Look up a reserved word by exact text.
///
/// Uses length-bucketing for fast rejection before any string comparison.
#[inline]
pub fn lookup(text: &str) -> Option<ReservedWord> {
    match text.len() {
        3 => match text {
            "wxs" => Some(ReservedWord::Wxs),
            _ => None,
        },
        4 => match text {
            "slot" => Some(ReservedWord::Slot),
            _ => None,
        },
        5 => match text {
            "block" => Some(ReservedWord::Block),
            _ => None,
        },
        6 => match text {
            "import" => Some(ReservedWord::Import),
            _ => None,
        },
        7 => match text {
            "include" => Some(ReservedWord::Include),
            _ => None,
        },
        8 => match text {
            "template" => Some(ReservedWord::Template),
            _ => None,
        },
        _ => None,
    }
}

/// Returns `true` if `text` is exactly a reserved word.
#[inline]
pub fn is_reserved(text: &str) -> bool {
    lookup(text).is_some()
}

#[cfg(test)]
mod tests;
