//! Hygiene: coding standards for the wire crate, enforced at test time.
//!
//! Production sources under `src/` (sibling `_test.rs` files excluded) are
//! scanned for patterns that panic or silently drop errors. Every budget is
//! zero and stays zero.

use std::fs;
use std::path::Path;

const BUDGETS: &[(&str, usize)] = &[
    (".unwrap()", 0),
    (".expect(", 0),
    ("panic!(", 0),
    ("unreachable!(", 0),
    ("todo!(", 0),
    ("unimplemented!(", 0),
    ("let _ =", 0),
    (".ok()", 0),
    ("#[allow(dead_code)]", 0),
];

fn production_sources(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            production_sources(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if path.extension().is_some_and(|e| e == "rs") && !name.ends_with("_test.rs") {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((name, content));
            }
        }
    }
}

#[test]
fn pattern_budgets_hold() {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; run from the crate root");

    let mut report = Vec::new();
    for (pattern, budget) in BUDGETS {
        let hits: Vec<String> = files
            .iter()
            .filter_map(|(path, content)| {
                let count = content.lines().filter(|line| line.contains(pattern)).count();
                (count > 0).then(|| format!("  {path}: {count}"))
            })
            .collect();
        let found: usize = files
            .iter()
            .map(|(_, content)| content.lines().filter(|line| line.contains(pattern)).count())
            .sum();
        if found > *budget {
            report.push(format!("`{pattern}` found {found}, budget {budget}\n{}", hits.join("\n")));
        }
    }
    assert!(report.is_empty(), "hygiene budgets exceeded:\n{}", report.join("\n"));
}
