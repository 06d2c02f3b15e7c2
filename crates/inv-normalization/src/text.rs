//! Free-text field cleanup.

use inv_model::RawValue;

/// Coerce a raw cell to text and trim surrounding whitespace.
pub fn clean_text(value: &RawValue) -> String {
    value.as_text().trim().to_string()
}

/// Capitalize every word, lowercasing the rest.
///
/// A letter starts a word when the previous character is not a letter, so
/// `"otros-varios"` becomes `"Otros-Varios"` and `"3d"` becomes `"3D"`. The
/// first letter takes its titlecase form: `"ßabc"` becomes `"Ssabc"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for ch in value.chars() {
        if !ch.is_alphabetic() {
            out.push(ch);
            previous_is_letter = false;
            continue;
        }
        if previous_is_letter {
            out.extend(ch.to_lowercase());
        } else {
            push_titlecase(&mut out, ch);
        }
        // Lowercasing can end in a combining mark ('İ' gives "i\u{307}").
        previous_is_letter = out.chars().next_back().is_some_and(char::is_alphabetic);
    }
    out
}

/// Digraph letters whose titlecase form differs from their uppercase form.
const TITLECASE_DIGRAPHS: &[(&[char], char)] = &[
    (&['\u{1C4}', '\u{1C5}', '\u{1C6}'], '\u{1C5}'),
    (&['\u{1C7}', '\u{1C8}', '\u{1C9}'], '\u{1C8}'),
    (&['\u{1CA}', '\u{1CB}', '\u{1CC}'], '\u{1CB}'),
    (&['\u{1F1}', '\u{1F2}', '\u{1F3}'], '\u{1F2}'),
];

/// Push the titlecase form of `ch`: the first character of its uppercase
/// mapping followed by the lowercased remainder.
fn push_titlecase(out: &mut String, ch: char) {
    if let Some((_, title)) = TITLECASE_DIGRAPHS
        .iter()
        .find(|(forms, _)| forms.contains(&ch))
    {
        out.push(*title);
        return;
    }
    let mut upper = ch.to_uppercase();
    if let Some(first) = upper.next() {
        out.push(first);
    }
    for rest in upper {
        out.extend(rest.to_lowercase());
    }
}
