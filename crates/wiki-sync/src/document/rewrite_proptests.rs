//! Property-based tests for the rewriting invariants
//!
//! Generated documents are built from link, image, and prose tokens joined by
//! whitespace, the shapes real documentation pages are made of.

use super::*;
use proptest::prelude::*;

const BASE_URL: &str = "https://raw.githubusercontent.com/wiki/o/r";

fn plain_segment_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9-]{0,10}"
}

// Page and directory names, optionally parenthesized like `Styling-(PEP-8)`
fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        plain_segment_strategy(),
        "[A-Za-z][A-Za-z0-9-]{0,6}-\\([A-Z0-9-]{1,5}\\)",
    ]
}

fn dir_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment_strategy(), 0..4)
}

fn page_path_strategy() -> impl Strategy<Value = (Vec<String>, String)> {
    (dir_strategy(), segment_strategy())
}

fn alt_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[A-Za-z][A-Za-z0-9 ]{0,12}"]
}

fn external_strategy() -> impl Strategy<Value = String> {
    "https?://[a-z]{1,8}\\.(com|io)/[a-z]{1,8}(\\.md|\\.png)?"
}

// One token of a generated document
fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        page_path_strategy().prop_map(|(dirs, page)| {
            let mut path = dirs.join("/");
            if !path.is_empty() {
                path.push('/');
            }
            format!("[{}]({}{}.md)", page, path, page)
        }),
        (
            alt_strategy(),
            prop::collection::vec(plain_segment_strategy(), 0..3),
            plain_segment_strategy(),
        )
            .prop_map(|(alt, dirs, name)| {
                let mut path = dirs.join("/");
                if !path.is_empty() {
                    path.push('/');
                }
                format!("![{}]({}{}.png)", alt, path, name)
            }),
        external_strategy().prop_map(|url| format!("[ext]({})", url)),
        external_strategy().prop_map(|url| format!("![ext]({})", url)),
        "[a-z]{1,8}",
        Just("|".to_string()),
    ]
}

fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (token_strategy(), prop_oneof![Just(" "), Just("\n"), Just(" | ")]),
        0..12,
    )
    .prop_map(|tokens| {
        tokens
            .into_iter()
            .map(|(token, sep)| format!("{}{}", token, sep))
            .collect::<String>()
    })
}

// Property 1: rewriting links a second time changes nothing
proptest! {
    #[test]
    fn prop_link_rewrite_idempotent(doc in document_strategy()) {
        let once = rewrite_links(&doc).into_owned();
        let twice = rewrite_links(&once).into_owned();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_full_rewrite_idempotent(doc in document_strategy(), dirs in dir_strategy()) {
        let file_dir = if dirs.is_empty() { ".".to_string() } else { dirs.join("/") };
        let once = rewrite_content(&doc, &file_dir, BASE_URL).into_owned();
        let twice = rewrite_content(&once, &file_dir, BASE_URL).into_owned();
        prop_assert_eq!(once, twice);
    }
}

// Property 2: external references pass through both rewriters untouched
proptest! {
    #[test]
    fn prop_external_link_identity(url in external_strategy(), text in "[a-zA-Z ]{1,10}") {
        let line = format!("[{}]({})", text, url);
        prop_assert_eq!(rewrite_links(&line), line.as_str());
    }

    #[test]
    fn prop_external_image_identity(url in external_strategy(), alt in alt_strategy()) {
        let line = format!("![{}]({})", alt, url);
        prop_assert_eq!(rewrite_images(&line, "Some/Dir", BASE_URL), line.as_str());
    }
}

// Property 3: alt text appears exactly when it is non-empty
proptest! {
    #[test]
    fn prop_alt_text_presence(alt in alt_strategy(), name in plain_segment_strategy()) {
        let line = format!("![{}](.assets/{}.png)", alt, name);
        let out = rewrite_images(&line, "Docs", BASE_URL).into_owned();

        prop_assert!(out.starts_with("[["));
        prop_assert!(out.ends_with("]]"));
        if alt.is_empty() {
            prop_assert!(!out.contains("|alt="));
        } else {
            let expected_suffix = format!("|alt={}]]", alt);
            prop_assert!(out.ends_with(&expected_suffix));
        }
    }
}

// Property 4: link targets lose every directory component
proptest! {
    #[test]
    fn prop_link_flattens_any_depth((dirs, page) in page_path_strategy()) {
        let nested = format!("[x]({}/{}.md)", dirs.join("/"), page);
        let flat = format!("[x]({}.md)", page);
        let expected = format!("[x]({})", page);

        prop_assert_eq!(rewrite_links(&nested), expected.as_str());
        prop_assert_eq!(rewrite_links(&flat), expected.as_str());
    }
}

// Property 5: resolved paths are fully normalized
proptest! {
    #[test]
    fn prop_join_normalized_is_clean(
        dirs in dir_strategy(),
        ups in 0usize..4,
        rest in dir_strategy(),
        name in segment_strategy(),
    ) {
        let file_dir = dirs.join("/");
        let relative = format!("./{}{}/{}.png", "../".repeat(ups), rest.join("//"), name);
        let resolved = join_normalized(&file_dir, &relative);

        prop_assert!(!resolved.contains("//"));
        prop_assert!(!resolved.split('/').any(|s| s == "."));
        prop_assert!(!resolved.starts_with('/'));

        // Walking up then down matches building the ancestor path directly
        let kept = dirs.len().saturating_sub(ups);
        let mut expected: Vec<String> = vec!["..".to_string(); ups.saturating_sub(dirs.len())];
        expected.extend(dirs[..kept].iter().cloned());
        expected.extend(rest.iter().cloned());
        expected.push(format!("{}.png", name));
        prop_assert_eq!(resolved, expected.join("/"));
    }
}
