use droidres::{
    KeyboardLayout, LanguageTable, ProtectedNames, ResourceDocument, SymbolTable, merge_document,
    prune_document, remove_string, render_layout,
};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::str::FromStr;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?]{0,30}").expect("valid value regex")
}

fn strings_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 1..12)
}

fn render_strings_xml(values: &BTreeMap<String, String>) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n");
    for (name, value) in values {
        xml.push_str(&format!("    <string name=\"{}\">{}</string>\n", name, value));
    }
    xml.push_str("</resources>\n");
    xml
}

fn table(values: &BTreeMap<String, String>) -> LanguageTable {
    values
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn entry_line(name: &str, value: &str) -> String {
    format!("<string name=\"{}\">{}</string>", name, value)
}

proptest! {
    #[test]
    fn prop_remover_preserves_other_entries(
        values in strings_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let xml = render_strings_xml(&values);
        let names: Vec<&String> = values.keys().collect();
        let target = names[pick.index(names.len())].clone();

        let mut doc = ResourceDocument::from_str(&xml).unwrap();
        prop_assert!(remove_string(&mut doc, &target));
        let out = String::from_utf8(doc.to_bytes().unwrap()).unwrap();

        let expected_line = format!("    {}\n", entry_line(&target, &values[&target]));
        prop_assert_eq!(out, xml.replacen(&expected_line, "", 1));
    }

    #[test]
    fn prop_layout_emits_one_key_per_present_position(
        rows in prop::collection::vec(
            prop::collection::vec(prop::option::of(prop::char::range('a', 'z')), 0..12),
            0..5,
        ),
    ) {
        let symbols = SymbolTable::new(
            rows.iter().map(|row| vec![None; row.len()]).collect(),
        );
        let layout = KeyboardLayout::new(rows.clone());
        let out = render_layout(&layout, &symbols).unwrap();

        prop_assert_eq!(out.matches("<Key ").count(), layout.key_count());

        let mut blocks = out.split("\t<Row>\n").skip(1);
        for row in &rows {
            let block = blocks.next().unwrap();
            let keys: Vec<&str> = block.lines().filter(|l| l.contains("<Key ")).collect();
            let present = row.iter().filter(|k| k.is_some()).count();
            prop_assert_eq!(keys.len(), present);
            for (i, line) in keys.iter().enumerate() {
                let left = i == 0;
                let right = i + 1 == present;
                let flag = match (left, right) {
                    (true, true) => Some("left|right"),
                    (true, false) => Some("left"),
                    (false, true) => Some("right"),
                    (false, false) => None,
                };
                match flag {
                    Some(flag) => {
                        let needle = format!("android:keyEdgeFlags=\"{}\"", flag);
                        prop_assert!(line.contains(&needle));
                    }
                    None => prop_assert!(!line.contains("keyEdgeFlags")),
                }
            }
        }
    }

    #[test]
    fn prop_merge_never_changes_protected_names(
        values in strings_strategy(),
        crowd in strings_strategy(),
    ) {
        let xml = render_strings_xml(&values);
        let mut doc = ResourceDocument::from_str(&xml).unwrap();
        // Protect every name of the document and offer a different value for each.
        let protected: ProtectedNames = values.keys().map(String::as_str).collect();
        let crowd_table: LanguageTable = values
            .keys()
            .map(|k| (k.clone(), format!("crowd {}", crowd.len())))
            .chain(crowd.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect();

        let updated = merge_document(&mut doc, &crowd_table, &protected);
        prop_assert!(updated.is_empty());
        prop_assert_eq!(doc.to_bytes().unwrap(), xml.into_bytes());
    }

    #[test]
    fn prop_merge_with_equal_text_is_byte_identical(values in strings_strategy()) {
        let xml = render_strings_xml(&values);
        let mut doc = ResourceDocument::from_str(&xml).unwrap();
        let updated = merge_document(&mut doc, &table(&values), &ProtectedNames::default());
        prop_assert!(updated.is_empty());
        prop_assert_eq!(doc.to_bytes().unwrap(), xml.into_bytes());
    }

    #[test]
    fn prop_prune_removes_exactly_baseline_duplicates(
        pairs in prop::collection::btree_map(
            key_strategy(),
            (value_strategy(), value_strategy(), any::<bool>()),
            1..12,
        ),
    ) {
        let baseline: BTreeMap<String, String> =
            pairs.iter().map(|(k, (en, _, _))| (k.clone(), en.clone())).collect();
        let translated: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, (en, other, same))| (k.clone(), if *same { en.clone() } else { other.clone() }))
            .collect();

        let xml = render_strings_xml(&translated);
        let mut doc = ResourceDocument::from_str(&xml).unwrap();
        let outcome = prune_document(&mut doc, &table(&baseline));
        prop_assert!(outcome.missing_from_baseline.is_empty());

        let out = String::from_utf8(doc.to_bytes().unwrap()).unwrap();
        for (name, value) in &translated {
            let line = entry_line(name, value);
            if baseline[name] == *value {
                prop_assert!(doc.get(name).is_none());
                prop_assert!(!out.contains(&line));
            } else {
                prop_assert_eq!(doc.get(name).map(|e| e.value()), Some(value.as_str()));
                prop_assert!(out.contains(&line));
            }
        }
    }
}

#[test]
fn greeting_example_from_baseline() {
    let baseline: LanguageTable = [("greeting".to_string(), "Hello".to_string())]
        .into_iter()
        .collect();

    let mut same = ResourceDocument::from_str(
        "<resources>\n    <string name=\"greeting\">Hello</string>\n</resources>\n",
    )
    .unwrap();
    prune_document(&mut same, &baseline);
    assert!(same.get("greeting").is_none());

    let mut different = ResourceDocument::from_str(
        "<resources>\n    <string name=\"greeting\">Bonjour</string>\n</resources>\n",
    )
    .unwrap();
    prune_document(&mut different, &baseline);
    assert_eq!(different.get("greeting").unwrap().value(), "Bonjour");
}

#[test]
fn setup_welcome_title_example() {
    let mut doc = ResourceDocument::from_str(
        "<resources>\n    <string name=\"setup_welcome_title\">Welcome</string>\n</resources>\n",
    )
    .unwrap();
    let crowd: LanguageTable = [("setup_welcome_title".to_string(), "Bienvenue".to_string())]
        .into_iter()
        .collect();
    merge_document(&mut doc, &crowd, &ProtectedNames::default());
    assert_eq!(doc.get("setup_welcome_title").unwrap().value(), "Welcome");
}
