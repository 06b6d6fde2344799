//! Neutralizes external entities in a descriptor's internal DTD subset.
//!
//! The XML parser never loads external resources, but it rejects a reference to
//! an entity it could not load. Declarations carrying a `SYSTEM` or `PUBLIC`
//! identifier are removed here, together with every reference to them, so such a
//! document parses as if the entity expanded to nothing. Internal entities are
//! left for the parser to expand.

use std::{borrow::Cow, ops::Range};

const DOCTYPE: &str = "<!DOCTYPE";
const ENTITY: &str = "<!ENTITY";

/// Returns `text` with externally identified entities and their references removed.
///
/// Input without an internal subset, or with one that cannot be scanned, is
/// returned unchanged for the parser to judge.
pub(super) fn strip_external_entities(text: &str) -> Cow<'_, str> {
    match scan(text) {
        Some(found) if !found.declarations.is_empty() => Cow::Owned(found.apply(text)),
        _ => Cow::Borrowed(text),
    }
}

#[derive(Debug, Default)]
struct ExternalEntities {
    declarations: Vec<Range<usize>>,
    general: Vec<String>,
    parameter: Vec<String>,
}

impl ExternalEntities {
    fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for range in &self.declarations {
            out.push_str(&text[last..range.start]);
            last = range.end;
        }
        out.push_str(&text[last..]);

        for name in &self.general {
            log::debug!("Ignoring external entity '{}'", name);
            out = out.replace(&format!("&{name};"), "");
        }
        for name in &self.parameter {
            log::debug!("Ignoring external parameter entity '{}'", name);
            out = out.replace(&format!("%{name};"), "");
        }
        out
    }
}

fn scan(text: &str) -> Option<ExternalEntities> {
    let bytes = text.as_bytes();
    let mut i = text.find(DOCTYPE)? + DOCTYPE.len();

    // Up to the internal subset; a doctype without one has nothing to strip.
    loop {
        match *bytes.get(i)? {
            b'"' | b'\'' => i = skip_quoted(bytes, i)?,
            b'[' => break,
            b'>' => return None,
            _ => i += 1,
        }
    }
    i += 1;

    let mut found = ExternalEntities::default();
    loop {
        let rest = text.get(i..)?;
        if rest.starts_with(']') {
            return Some(found);
        } else if rest.starts_with("<!--") {
            i += rest.find("-->")? + 3;
        } else if rest.starts_with("<?") {
            i += rest.find("?>")? + 2;
        } else if rest.starts_with(ENTITY) {
            let end = declaration_end(bytes, i)?;
            if let Some((name, parameter)) = external_declaration(&text[i + ENTITY.len()..end - 1]) {
                found.declarations.push(i..end);
                if parameter {
                    found.parameter.push(name);
                } else {
                    found.general.push(name);
                }
            }
            i = end;
        } else if rest.starts_with("<!") {
            i = declaration_end(bytes, i)?;
        } else {
            i += rest.chars().next()?.len_utf8();
        }
    }
}

/// Index just past the closing quote of the literal starting at `start`.
fn skip_quoted(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let len = bytes.get(start + 1..)?.iter().position(|&b| b == quote)?;
    Some(start + len + 2)
}

/// Index just past the `>` closing the markup declaration at `start`.
fn declaration_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    loop {
        match *bytes.get(i)? {
            b'"' | b'\'' => i = skip_quoted(bytes, i)?,
            b'>' => return Some(i + 1),
            _ => i += 1,
        }
    }
}

/// Name and parameter flag of an entity declared with an external identifier.
fn external_declaration(body: &str) -> Option<(String, bool)> {
    let mut tokens = body.split_ascii_whitespace();
    let mut name = tokens.next()?;
    let parameter = name == "%";
    if parameter {
        name = tokens.next()?;
    }
    match tokens.next()? {
        "SYSTEM" | "PUBLIC" => Some((name.to_string(), parameter)),
        _ => None,
    }
}
