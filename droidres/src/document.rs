//! Lossless model of Android `strings.xml` files.
//!
//! A [`ResourceDocument`] keeps every XML event of the file it was read from.
//! Only direct `<string>` children of the root element are modelled as
//! [`StringEntry`] values; comments, whitespace, `<plurals>`, `<string-array>`
//! and everything else pass through untouched, so a document written back
//! without edits reproduces its input byte for byte.
//!
//! Entry values are kept as raw inner markup (still XML-escaped, inline tags
//! included). Two values are equal when their markup is equal.

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{collections::HashMap, fs, io::Write, path::Path, str::FromStr};

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::error::Error;

/// A parsed `strings.xml` file.
#[derive(Debug, Clone)]
pub struct ResourceDocument {
    nodes: Vec<Node>,
    encoding: &'static Encoding,
    bom: bool,
}

#[derive(Debug, Clone)]
enum Node {
    Markup(Event<'static>),
    Entry(StringEntry),
}

impl Node {
    fn is_whitespace(&self) -> bool {
        match self {
            Node::Markup(Event::Text(text)) => text.iter().all(|b| b.is_ascii_whitespace()),
            _ => false,
        }
    }

    // Whitespace that does not end the line.
    fn is_inline_space(&self) -> bool {
        match self {
            Node::Markup(Event::Text(text)) => {
                text.iter().all(|b| b.is_ascii_whitespace() && *b != b'\n')
            }
            _ => false,
        }
    }
}

/// One `<string name="...">` element.
#[derive(Debug, Clone)]
pub struct StringEntry {
    name: String,
    start: BytesStart<'static>,
    value: String,
    // `None` for a self-closing element.
    end: Option<BytesEnd<'static>>,
}

impl StringEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw inner markup of the element.
    pub fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        if self.end.is_none() {
            self.end = Some(self.start.to_end().into_owned());
        }
        self.value = value.to_string();
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        match &self.end {
            None => writer.write_event(Event::Empty(self.start.clone()))?,
            Some(end) => {
                writer.write_event(Event::Start(self.start.clone()))?;
                if !self.value.is_empty() {
                    writer.write_event(Event::Text(BytesText::from_escaped(self.value.as_str())))?;
                }
                writer.write_event(Event::End(end.clone()))?;
            }
        }
        Ok(())
    }
}

impl FromStr for ResourceDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ResourceDocument {
            nodes: parse_nodes(s)?,
            encoding: UTF_8,
            bom: false,
        })
    }
}

impl ResourceDocument {
    /// Parse raw file contents, detecting the encoding from a BOM or the XML
    /// declaration. Bytes that are invalid in that encoding are an error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let (text, encoding, bom) = decode(bytes)?;
        Ok(ResourceDocument {
            nodes: parse_nodes(&text)?,
            encoding,
            bom,
        })
    }

    /// Read and parse the file at `path`. Errors carry the path.
    pub fn read_from(path: &Path) -> Result<Self, Error> {
        fs::read(path)
            .map_err(Error::Io)
            .and_then(|bytes| Self::from_bytes(&bytes))
            .map_err(|e| e.at(path))
    }

    /// Replace the file at `path` with this document in its original encoding.
    /// Errors carry the path.
    pub fn write_to(&self, path: &Path) -> Result<(), Error> {
        self.to_bytes()
            .and_then(|bytes| fs::write(path, bytes).map_err(Error::Io))
            .map_err(|e| e.at(path))
    }

    /// Iterate over the `<string>` entries in document order.
    pub fn entries(&self) -> impl Iterator<Item = &StringEntry> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Entry(entry) => Some(entry),
            Node::Markup(_) => None,
        })
    }

    pub fn get(&self, name: &str) -> Option<&StringEntry> {
        self.entries().find(|entry| entry.name == name)
    }

    /// The encoding the document was read in and will be written in.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Replace the value of every entry called `name`.
    ///
    /// Returns `true` if any entry actually changed.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        let mut changed = false;
        for node in &mut self.nodes {
            if let Node::Entry(entry) = node {
                if entry.name == name && entry.value != value {
                    entry.set_value(value);
                    changed = true;
                }
            }
        }
        changed
    }

    /// Remove every entry matching `pred`, together with the whitespace run
    /// (indentation) directly in front of it and a comment that follows it on
    /// the same line.
    ///
    /// Returns the names of the removed entries in document order.
    pub fn remove_where<F>(&mut self, mut pred: F) -> Vec<String>
    where
        F: FnMut(&StringEntry) -> bool,
    {
        let mut removed = Vec::new();
        let mut dropped = vec![false; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            let Node::Entry(entry) = node else {
                continue;
            };
            if !pred(entry) {
                continue;
            }
            dropped[i] = true;
            removed.push(entry.name.clone());
            if i > 0 && self.nodes[i - 1].is_whitespace() {
                dropped[i - 1] = true;
            }

            let mut next = i + 1;
            if self.nodes.get(next).is_some_and(Node::is_inline_space) {
                next += 1;
            }
            if let Some(Node::Markup(Event::Comment(_))) = self.nodes.get(next) {
                dropped[i + 1..=next].fill(true);
            }
        }

        let mut index = 0;
        self.nodes.retain(|_| {
            index += 1;
            !dropped[index - 1]
        });
        removed
    }

    /// Insert an XML declaration naming the document's encoding if it has none.
    ///
    /// Returns `true` if a declaration was added.
    pub fn ensure_declaration(&mut self) -> bool {
        if matches!(self.nodes.first(), Some(Node::Markup(Event::Decl(_)))) {
            return false;
        }
        let label = self.encoding.name().to_ascii_lowercase();
        let decl = BytesDecl::new("1.0", Some(&label), None);
        self.nodes.insert(0, Node::Markup(Event::Text(BytesText::new("\n"))));
        self.nodes.insert(0, Node::Markup(Event::Decl(decl)));
        true
    }

    /// Serialize the document, re-encoding it and restoring any BOM.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut writer = Writer::new(Vec::new());
        for node in &self.nodes {
            match node {
                Node::Markup(event) => writer.write_event(event.clone())?,
                Node::Entry(entry) => entry.write(&mut writer)?,
            }
        }
        let text = String::from_utf8(writer.into_inner())
            .map_err(|e| Error::DataMismatch(e.to_string()))?;
        Ok(encode(&text, self.encoding, self.bom))
    }
}

/// Name → value lookup built from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTable {
    values: HashMap<String, String>,
}

impl LanguageTable {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<&ResourceDocument> for LanguageTable {
    /// Later duplicates of a name override earlier ones.
    fn from(doc: &ResourceDocument) -> Self {
        doc.entries()
            .map(|entry| (entry.name.clone(), entry.value.clone()))
            .collect()
    }
}

impl FromIterator<(String, String)> for LanguageTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        LanguageTable {
            values: iter.into_iter().collect(),
        }
    }
}

fn decode(bytes: &[u8]) -> Result<(String, &'static Encoding, bool), Error> {
    // A declaration readable as ASCII cannot be UTF-16; map it to its output encoding.
    let (encoding, bom_len) = Encoding::for_bom(bytes).unwrap_or_else(|| {
        let declared = declared_encoding(bytes).map(Encoding::output_encoding);
        (declared.unwrap_or(UTF_8), 0)
    });

    // Invalid input is an error, never replaced with U+FFFD.
    let text = encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .ok_or_else(|| {
            Error::DataMismatch(format!("input is not valid {}", encoding.name()))
        })?;
    Ok((text.into_owned(), encoding, bom_len > 0))
}

fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    match reader.read_event_into(&mut buf).ok()? {
        Event::Decl(decl) => {
            let label = decl.encoding()?.ok()?;
            Encoding::for_label(&label)
        }
        _ => None,
    }
}

fn encode(text: &str, encoding: &'static Encoding, bom: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 3);
    if encoding == UTF_16LE || encoding == UTF_16BE {
        let little_endian = encoding == UTF_16LE;
        if bom {
            out.extend_from_slice(if little_endian { &[0xFF, 0xFE] } else { &[0xFE, 0xFF] });
        }
        for unit in text.encode_utf16() {
            let bytes = if little_endian {
                unit.to_le_bytes()
            } else {
                unit.to_be_bytes()
            };
            out.extend_from_slice(&bytes);
        }
        return out;
    }

    if bom && encoding == UTF_8 {
        out.extend_from_slice(b"\xEF\xBB\xBF");
    }
    // Characters the target encoding cannot represent become numeric character references.
    let (bytes, _, _) = encoding.encode(text);
    out.extend_from_slice(&bytes);
    out
}

fn parse_nodes(text: &str) -> Result<Vec<Node>, Error> {
    let mut reader = Reader::from_str(text);
    let mut nodes = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) if depth == 1 && e.name().as_ref() == b"string" => {
                let name = entry_name(&e)?;
                let (value, end) = read_inner_markup(&mut reader)?;
                nodes.push(Node::Entry(StringEntry {
                    name,
                    start: e.into_owned(),
                    value,
                    end: Some(end),
                }));
            }
            Event::Empty(e) if depth == 1 && e.name().as_ref() == b"string" => {
                nodes.push(Node::Entry(StringEntry {
                    name: entry_name(&e)?,
                    start: e.into_owned(),
                    value: String::new(),
                    end: None,
                }));
            }
            event => {
                match &event {
                    Event::Start(_) => depth += 1,
                    Event::End(_) => depth = depth.saturating_sub(1),
                    _ => {}
                }
                nodes.push(Node::Markup(event.into_owned()));
            }
        }
    }
    Ok(nodes)
}

fn entry_name(start: &BytesStart) -> Result<String, Error> {
    for attr in start.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::DataMismatch(e.to_string()))?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(Error::InvalidResource(
        "string tag missing 'name'".to_string(),
    ))
}

/// Collect everything up to the matching `</string>` as raw markup.
fn read_inner_markup(reader: &mut Reader<&[u8]>) -> Result<(String, BytesEnd<'static>), Error> {
    let mut writer = Writer::new(Vec::new());
    let mut depth = 0usize;
    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(_) => depth += 1,
            Event::End(end) if depth == 0 => {
                let end = end.clone().into_owned();
                let value = String::from_utf8(writer.into_inner())
                    .map_err(|e| Error::DataMismatch(e.to_string()))?;
                return Ok((value, end));
            }
            Event::End(_) => depth -= 1,
            Event::Eof => {
                return Err(Error::InvalidResource(
                    "unexpected end of file inside <string>".to_string(),
                ));
            }
            _ => {}
        }
        writer.write_event(event)?;
    }
}
