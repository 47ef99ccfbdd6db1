//! Anki plain-text export
//!
//! Produces the tab-separated format Anki's "Import File" dialog reads, with
//! header directives so the importer needs no manual setup:
//!
//! ```text
//! #separator:tab
//! #html:true
//! #deck:<deck name>
//! #notetype:Basic
//! front<TAB>back
//! ```
//!
//! Tab separates fields and newline separates records, so both are escaped
//! out of card text: tabs become spaces, newlines become `<br>` (rendered as a
//! line break because of `#html:true`).

use serde::{Deserialize, Serialize};

use super::models::Flashcard;

/// One exported note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnkiCard {
    pub front: String,
    pub back: String,
}

impl AnkiCard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

impl From<&Flashcard> for AnkiCard {
    fn from(card: &Flashcard) -> Self {
        Self::new(card.front.as_str(), card.back.as_str())
    }
}

fn escape_field(text: &str) -> String {
    text.replace('\t', " ").replace('\n', "<br>")
}

/// Render `cards` as an Anki import file for a deck called `deck_name`
pub fn export_anki(cards: &[AnkiCard], deck_name: &str) -> String {
    let mut lines = vec![
        "#separator:tab".to_string(),
        "#html:true".to_string(),
        format!("#deck:{}", escape_field(deck_name)),
        "#notetype:Basic".to_string(),
    ];

    lines.extend(
        cards
            .iter()
            .map(|card| format!("{}\t{}", escape_field(&card.front), escape_field(&card.back))),
    );

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "#separator:tab\n#html:true\n#deck:Deck A\n#notetype:Basic\n";

    #[test]
    fn test_empty_deck_is_header_only() {
        assert_eq!(export_anki(&[], "Deck A"), HEADER);
    }

    #[test]
    fn test_tab_and_newline_escaping() {
        let output = export_anki(&[AnkiCard::new("a\tb", "c\nd")], "D");
        assert_eq!(
            output,
            "#separator:tab\n#html:true\n#deck:D\n#notetype:Basic\na b\tc<br>d\n"
        );
    }

    #[test]
    fn test_records_keep_input_order() {
        let cards = vec![
            AnkiCard::new("What is 2+2?", "4"),
            AnkiCard::new("Capital of France?", "Paris"),
        ];
        let output = export_anki(&cards, "Deck A");
        let records: Vec<&str> = output.lines().skip(4).collect();
        assert_eq!(records, ["What is 2+2?\t4", "Capital of France?\tParis"]);
        assert!(output.ends_with("Paris\n"));
    }

    #[test]
    fn test_deck_name_is_escaped() {
        let output = export_anki(&[], "Bio\tlogy\nI");
        assert_eq!(output.lines().nth(2), Some("#deck:Bio logy<br>I"));
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn test_html_is_passed_through() {
        let output = export_anki(&[AnkiCard::new("<b>bold</b>", "x")], "D");
        assert!(output.contains("<b>bold</b>\tx\n"));
    }
}
