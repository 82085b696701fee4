//! Link extraction from note bodies.
//!
//! Notes reference each other with markdown links whose destination carries
//! the `:/` note scheme, e.g. `[Other note](:/a1b2c3)`. A destination may
//! also carry an in-document anchor (`:/a1b2c3#section`), which matches the
//! destination note with the fragment ignored.

use pulldown_cmark::{Event as MdEvent, LinkType, Options, Parser as MdParser, Tag as MdTag};
use std::collections::BTreeSet;

use crate::model::NoteId;

/// Destination prefix marking an internal note link.
const NOTE_LINK_SCHEME: &str = ":/";

pub fn notegraph_md_options() -> Options {
    let mut md_options = Options::empty();
    md_options.insert(Options::ENABLE_FOOTNOTES);
    md_options.insert(Options::ENABLE_GFM);
    md_options.insert(Options::ENABLE_STRIKETHROUGH);
    md_options.insert(Options::ENABLE_TABLES);
    md_options.insert(Options::ENABLE_TASKLISTS);
    md_options.insert(Options::ENABLE_WIKILINKS);
    md_options
}

/// Drop a trailing `#fragment` from a raw link target.
pub fn strip_anchor(target: &str) -> &str {
    match target.find('#') {
        Some(idx) => &target[..idx],
        None => target,
    }
}

/// Maps a pulldown-cmark link to the note id it references, if any.
///
/// Plain `Reference`/`Collapsed`/`Shortcut` links resolve within the
/// document and never point at another note. Everything else is a note link
/// when its destination carries the `:/` scheme.
fn link_to_note_id(link_type: &LinkType, dest_url: &str) -> Option<NoteId> {
    match link_type {
        LinkType::Reference | LinkType::Collapsed | LinkType::Shortcut | LinkType::Email => None,
        LinkType::Autolink
        | LinkType::Inline
        | LinkType::ReferenceUnknown
        | LinkType::CollapsedUnknown
        | LinkType::ShortcutUnknown
        | LinkType::WikiLink { .. } => {
            let target = strip_anchor(dest_url.strip_prefix(NOTE_LINK_SCHEME)?);
            if target.is_empty() {
                None
            } else {
                Some(NoteId::from(target))
            }
        }
    }
}

/// Parse a note body and return the set of note ids it links to.
///
/// Anchors are stripped and duplicates collapse. Malformed or external
/// destinations simply contribute nothing; this never fails.
pub fn extract_links(body: &str) -> BTreeSet<NoteId> {
    let mut targets = BTreeSet::new();
    for event in MdParser::new_ext(body, notegraph_md_options()) {
        match event {
            MdEvent::Start(MdTag::Link {
                link_type,
                dest_url,
                ..
            })
            | MdEvent::Start(MdTag::Image {
                link_type,
                dest_url,
                ..
            }) => {
                if let Some(id) = link_to_note_id(&link_type, &dest_url) {
                    targets.insert(id);
                }
            }
            _ => {}
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_inline_note_links() {
        let body = "See [alpha](:/aaa) and [beta](:/bbb).";
        let links = extract_links(body);
        assert_eq!(
            links,
            BTreeSet::from([NoteId::from("aaa"), NoteId::from("bbb")])
        );
    }

    #[test]
    fn anchor_fragments_are_stripped() {
        let body = "Jump to [a section](:/aaa#some-heading).";
        assert_eq!(extract_links(body), BTreeSet::from([NoteId::from("aaa")]));
    }

    #[test]
    fn duplicates_collapse_into_a_set() {
        let body = "[one](:/aaa) and [again](:/aaa) and [anchored](:/aaa#h)";
        assert_eq!(extract_links(body).len(), 1);
    }

    #[test]
    fn external_and_malformed_links_contribute_nothing() {
        let body = "[web](https://example.org) [rel](./other.md) [empty](:/) plain :/zzz text";
        assert!(extract_links(body).is_empty());
    }

    #[test]
    fn image_embeds_with_note_scheme_are_extracted() {
        // Resource embeds use the same scheme; nonexistent destinations are
        // dropped later by the builder, not here.
        let body = "![diagram](:/resource123)";
        assert_eq!(
            extract_links(body),
            BTreeSet::from([NoteId::from("resource123")])
        );
    }

    #[test]
    fn no_links_yields_empty_set() {
        assert!(extract_links("just *prose*, nothing else").is_empty());
        assert!(extract_links("").is_empty());
    }
}
