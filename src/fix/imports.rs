// SPDX-License-Identifier: MIT

//! Import hygiene.
//!
//! Deletes an empty `from X import` and prunes imported symbols that no
//! later non-import line references verbatim. The reference check is
//! textual substring matching, by contract.

fn is_import_line(line: &str) -> bool {
    let stripped = line.trim_start();
    stripped.starts_with("import ") || stripped.starts_with("from ")
}

/// Whether `name` appears verbatim in any non-import line after `idx`.
fn is_referenced(lines: &[String], idx: usize, name: &str) -> bool {
    lines[idx + 1..]
        .iter()
        .filter(|l| !is_import_line(l))
        .any(|l| l.contains(name))
}

/// Apply the import hygiene pass to a line sequence.
pub fn apply(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let stripped = line.trim_start();
        let indent = &line[..line.len() - stripped.len()];

        let rest = match stripped.strip_prefix("from ") {
            Some(r) => r,
            None => {
                out.push(line.clone());
                continue;
            }
        };

        // `from X import` with nothing after it
        if rest.trim_end().ends_with(" import") {
            continue;
        }

        let (module, symbols) = match rest.split_once(" import ") {
            Some(pair) => pair,
            None => {
                out.push(line.clone());
                continue;
            }
        };

        let original: Vec<&str> = symbols
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let kept: Vec<&str> = original
            .iter()
            .copied()
            .filter(|sym| {
                // `x as y` is referenced through its alias
                let name = sym.rsplit(" as ").next().unwrap_or(sym).trim();
                is_referenced(lines, i, name)
            })
            .collect();

        if kept.is_empty() {
            continue;
        }
        if kept.len() == original.len() {
            out.push(line.clone());
        } else {
            out.push(format!(
                "{}from {} import {}",
                indent,
                module.trim(),
                kept.join(", ")
            ));
        }
    }

    out
}
