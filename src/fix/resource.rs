// SPDX-License-Identifier: MIT

//! Implicit-resource wrapping.
//!
//! Detects an assignment whose right-hand side constructs a process
//! handle and rewrites it into a scoped acquisition binding the call to
//! the original name. The call's extent is found by tracking parenthesis
//! balance across lines; the statements that use the handle are pulled
//! into the new block until a dedent.

use lazy_static::lazy_static;
use regex::Regex;

use super::indent::leading_spaces;

lazy_static! {
    /// Assignment of a process-handle constructor call.
    static ref HANDLE_ASSIGN: Regex =
        Regex::new(r"^(\s*)([A-Za-z_]\w*)\s*=\s*((?:subprocess\.)?Popen\s*\(.*)$").unwrap();
}

/// Net parenthesis balance of a line. Naive by contract: parentheses in
/// string literals count too.
fn paren_balance(line: &str) -> i32 {
    line.chars().fold(0, |acc, c| match c {
        '(' => acc + 1,
        ')' => acc - 1,
        _ => acc,
    })
}

/// Whether the line at `idx` already sits inside a scoped-acquisition
/// block: the nearest non-blank line above with a smaller indent is a
/// `with` header.
fn inside_with_block(lines: &[String], idx: usize, indent: usize) -> bool {
    for line in lines[..idx].iter().rev() {
        let stripped = line.trim_start();
        if stripped.is_empty() {
            continue;
        }
        if leading_spaces(line) < indent {
            return stripped.starts_with("with ");
        }
    }
    false
}

/// Apply the implicit-resource wrapping to a line sequence.
pub fn apply(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let caps = match HANDLE_ASSIGN.captures(&lines[i]) {
            Some(c) => c,
            None => {
                out.push(lines[i].clone());
                i += 1;
                continue;
            }
        };

        let indent_str = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let name = &caps[2];
        let call_start = &caps[3];

        if inside_with_block(lines, i, indent_str.len()) {
            out.push(lines[i].clone());
            i += 1;
            continue;
        }

        // find the call extent
        let mut balance = paren_balance(call_start);
        let mut end = i;
        while balance > 0 && end + 1 < lines.len() {
            end += 1;
            balance += paren_balance(&lines[end]);
        }
        if balance != 0 {
            // never closes; leave it alone
            out.push(lines[i].clone());
            i += 1;
            continue;
        }

        // collapse the call and synthesize the acquisition
        let mut call = call_start.trim_end().to_string();
        for cont in &lines[i + 1..=end] {
            call.push(' ');
            call.push_str(cont.trim());
        }
        out.push(format!("{}with {} as {}:", indent_str, call, name));

        // pull the handle's statements into the block
        let mut j = end + 1;
        while j < lines.len() {
            let follow = &lines[j];
            if follow.trim().is_empty() {
                break;
            }
            if leading_spaces(follow) < indent_str.len() {
                break;
            }
            if !follow.contains(name) {
                break;
            }
            out.push(format!("    {}", follow));
            j += 1;
        }
        i = j;
    }

    out
}
