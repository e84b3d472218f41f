//! Keyboard layout XML generation.
//!
//! Renders a table of key characters into the `<Row>`/`<Key>` fragment used by
//! Android keyboard definitions. Each key gets its code point list, its label,
//! an optional alternate symbol (shown as `altLabel` and offered as popup
//! character), and edge flags on the outermost keys of its row.

use std::{fmt, str::FromStr};

use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::Error;

/// Rows of keys; `None` marks a position without a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardLayout {
    rows: Vec<Vec<Option<char>>>,
}

impl KeyboardLayout {
    pub fn new(rows: Vec<Vec<Option<char>>>) -> Self {
        KeyboardLayout { rows }
    }

    /// One string per row, one key per character.
    pub fn from_rows(rows: &[&str]) -> Self {
        KeyboardLayout {
            rows: rows
                .iter()
                .map(|row| row.chars().map(Some).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<Option<char>>] {
        &self.rows
    }

    /// Number of keys (non-null positions).
    pub fn key_count(&self) -> usize {
        self.rows.iter().flatten().filter(|key| key.is_some()).count()
    }
}

/// Alternate labels, positionally aligned with a [`KeyboardLayout`].
///
/// Values are written as attribute text, so they may carry Android resource
/// escapes (`\@`, `\?`) but must not be XML-escaped in advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    rows: Vec<Vec<Option<String>>>,
}

impl SymbolTable {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        SymbolTable { rows }
    }

    fn from_static(rows: &[&[Option<&str>]]) -> Self {
        SymbolTable {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|s| s.map(str::to_string)).collect())
                .collect(),
        }
    }

    fn slot(&self, row: usize, column: usize) -> Option<&Option<String>> {
        self.rows.get(row)?.get(column)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::from_static(&[
            &[
                Some("1"),
                Some("2"),
                Some("3"),
                Some("4"),
                Some("5"),
                Some("6"),
                Some("7"),
                Some("8"),
                Some("9"),
                Some("0"),
                None,
            ],
            &[
                Some("\\@"),
                Some("\\#"),
                Some("$"),
                Some("%"),
                Some("&"),
                Some("*"),
                Some("-"),
                Some("+"),
                Some("("),
                Some(")"),
                None,
            ],
            &[
                Some("!"),
                Some("\""),
                Some("'"),
                Some(":"),
                Some(";"),
                Some("/"),
                Some("\\?"),
                Some("["),
                Some("]"),
                None,
            ],
            &[None; 9],
        ])
    }
}

/// Layouts shipped with the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuiltinLayout {
    #[default]
    Colemak,
    BulgarianBds,
    Armenian,
}

impl BuiltinLayout {
    pub const ALL: [BuiltinLayout; 3] = [
        BuiltinLayout::Colemak,
        BuiltinLayout::BulgarianBds,
        BuiltinLayout::Armenian,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinLayout::Colemak => "colemak",
            BuiltinLayout::BulgarianBds => "bulgarian-bds",
            BuiltinLayout::Armenian => "armenian",
        }
    }

    pub fn layout(self) -> KeyboardLayout {
        match self {
            BuiltinLayout::Colemak => {
                KeyboardLayout::from_rows(&["qwfpgjluy;", "arstdhneio", "zxcvbkm"])
            }
            BuiltinLayout::BulgarianBds => {
                KeyboardLayout::from_rows(&["уеишщксдзцб", "ьяаожгтнвмч", "юйъэфхпрл"])
            }
            BuiltinLayout::Armenian => KeyboardLayout::from_rows(&[
                "Էթփձջրչճժծ",
                "քոեռտըւիօպ",
                "ասդֆգհյկլխ",
                "զղցվբնմշ",
            ]),
        }
    }
}

impl fmt::Display for BuiltinLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinLayout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinLayout::ALL
            .into_iter()
            .find(|layout| layout.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::DataMismatch(format!("unknown layout `{}`", s)))
    }
}

/// Render `layout` as `<Row>` blocks, taking alternate labels from `symbols`.
///
/// Every key position must exist in `symbols` (possibly as `None`); otherwise
/// [`Error::LayoutShape`] names the first position without a slot.
pub fn render_layout(layout: &KeyboardLayout, symbols: &SymbolTable) -> Result<String, Error> {
    let mut writer = Writer::new(Vec::new());

    for (i, row) in layout.rows.iter().enumerate() {
        let first = row.iter().position(Option::is_some);
        let last = row.iter().rposition(Option::is_some);

        writer.write_event(Event::Text(BytesText::new("\t")))?;
        writer.write_event(Event::Start(BytesStart::new("Row")))?;
        writer.write_event(Event::Text(BytesText::new("\n")))?;

        for (j, key) in row.iter().enumerate() {
            let Some(key) = key else { continue };
            let alt = symbols
                .slot(i, j)
                .ok_or(Error::LayoutShape { row: i, column: j })?;

            let label = key.to_string();
            let codes = label
                .chars()
                .map(|c| u32::from(c).to_string())
                .collect::<Vec<_>>()
                .join(",");

            let mut elem = BytesStart::new("Key");
            elem.push_attribute(("android:codes", codes.as_str()));
            elem.push_attribute(("android:keyLabel", label.as_str()));
            if let Some(alt) = alt {
                elem.push_attribute(("altLabel", alt.as_str()));
                elem.push_attribute(("android:popupCharacters", alt.as_str()));
            }
            let edge = match (Some(j) == first, Some(j) == last) {
                (true, true) => Some("left|right"),
                (true, false) => Some("left"),
                (false, true) => Some("right"),
                (false, false) => None,
            };
            if let Some(edge) = edge {
                elem.push_attribute(("android:keyEdgeFlags", edge));
            }

            writer.write_event(Event::Text(BytesText::new("\t\t")))?;
            writer.write_event(Event::Empty(elem))?;
            writer.write_event(Event::Text(BytesText::new("\n")))?;
        }

        writer.write_event(Event::Text(BytesText::new("\t")))?;
        writer.write_event(Event::End(BytesEnd::new("Row")))?;
        writer.write_event(Event::Text(BytesText::new("\n")))?;
    }

    String::from_utf8(writer.into_inner()).map_err(|e| Error::DataMismatch(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row_output() {
        let layout = KeyboardLayout::from_rows(&["ab"]);
        let symbols = SymbolTable::new(vec![vec![Some("1".to_string()), None]]);
        let out = render_layout(&layout, &symbols).unwrap();
        assert_eq!(
            out,
            "\t<Row>\n\
             \t\t<Key android:codes=\"97\" android:keyLabel=\"a\" altLabel=\"1\" android:popupCharacters=\"1\" android:keyEdgeFlags=\"left\"/>\n\
             \t\t<Key android:codes=\"98\" android:keyLabel=\"b\" android:keyEdgeFlags=\"right\"/>\n\
             \t</Row>\n"
        );
    }

    #[test]
    fn test_symbols_are_xml_escaped() {
        let layout = KeyboardLayout::from_rows(&["abc"]);
        let symbols = SymbolTable::new(vec![vec![
            Some("&".to_string()),
            Some("\"".to_string()),
            Some("\\@".to_string()),
        ]]);
        let out = render_layout(&layout, &symbols).unwrap();
        assert!(out.contains(r#"altLabel="&amp;""#));
        assert!(out.contains(r#"altLabel="&quot;""#));
        assert!(out.contains(r#"altLabel="\@""#));
    }

    #[test]
    fn test_absent_keys_are_skipped_and_edges_follow_present_keys() {
        let layout = KeyboardLayout::new(vec![vec![None, Some('x'), Some('y'), None]]);
        let symbols = SymbolTable::new(vec![vec![None; 4]]);
        let out = render_layout(&layout, &symbols).unwrap();
        assert_eq!(out.matches("<Key ").count(), 2);
        assert!(out.contains(r#"android:keyLabel="x" android:keyEdgeFlags="left""#));
        assert!(out.contains(r#"android:keyLabel="y" android:keyEdgeFlags="right""#));
    }

    #[test]
    fn test_single_key_row_has_both_edges() {
        let layout = KeyboardLayout::from_rows(&["z"]);
        let symbols = SymbolTable::new(vec![vec![None]]);
        let out = render_layout(&layout, &symbols).unwrap();
        assert!(out.contains(r#"android:keyEdgeFlags="left|right""#));
        assert_eq!(out.matches("keyEdgeFlags").count(), 1);
    }

    #[test]
    fn test_non_ascii_codes() {
        let layout = KeyboardLayout::from_rows(&["щ"]);
        let symbols = SymbolTable::new(vec![vec![None]]);
        let out = render_layout(&layout, &symbols).unwrap();
        assert!(out.contains(r#"android:codes="1097" android:keyLabel="щ""#));
    }

    #[test]
    fn test_shape_mismatch_is_reported() {
        let layout = KeyboardLayout::from_rows(&["abc", "d"]);
        let symbols = SymbolTable::new(vec![vec![None, None]]);
        let err = render_layout(&layout, &symbols).unwrap_err();
        assert!(matches!(err, Error::LayoutShape { row: 0, column: 2 }));

        let symbols = SymbolTable::new(vec![vec![None; 3]]);
        let err = render_layout(&layout, &symbols).unwrap_err();
        assert!(matches!(err, Error::LayoutShape { row: 1, column: 0 }));
    }

    #[test]
    fn test_builtin_layouts_fit_default_symbols() {
        let symbols = SymbolTable::default();
        for builtin in BuiltinLayout::ALL {
            let layout = builtin.layout();
            let out = render_layout(&layout, &symbols).unwrap();
            assert_eq!(out.matches("<Key ").count(), layout.key_count());
            assert_eq!(out.matches("<Row>").count(), layout.rows().len());
        }
    }

    #[test]
    fn test_colemak_first_key() {
        let out = render_layout(&BuiltinLayout::Colemak.layout(), &SymbolTable::default()).unwrap();
        assert!(out.starts_with(
            "\t<Row>\n\t\t<Key android:codes=\"113\" android:keyLabel=\"q\" altLabel=\"1\" android:popupCharacters=\"1\" android:keyEdgeFlags=\"left\"/>\n"
        ));
        assert!(out.contains(r#"android:keyLabel=";" altLabel="0" android:popupCharacters="0" android:keyEdgeFlags="right""#));
    }

    #[test]
    fn test_builtin_layout_from_str() {
        assert_eq!(
            "bulgarian-bds".parse::<BuiltinLayout>().unwrap(),
            BuiltinLayout::BulgarianBds
        );
        assert_eq!("COLEMAK".parse::<BuiltinLayout>().unwrap(), BuiltinLayout::Colemak);
        assert!("dvorak".parse::<BuiltinLayout>().is_err());
    }
}
