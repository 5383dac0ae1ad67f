// SPDX-License-Identifier: MIT

//! Scoped-acquisition repair.
//!
//! Repairs three common defects around `with` blocks: an acquisition
//! assigned instead of entered (`name = with expr`), a clause split after
//! its `as` binding keyword, and a header written without its terminating
//! colon (whose body then sits at the wrong level).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `name = with expr`: the assignment is a defect, only the
    /// acquisition is meaningful.
    static ref ASSIGNED_WITH: Regex =
        Regex::new(r"^(\s*)[A-Za-z_]\w*\s*=\s*(with\b.*)$").unwrap();
}

/// Apply the scoped-acquisition repairs to a line sequence.
pub fn apply(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let mut line = lines[i].clone();
        i += 1;

        // rejoin a clause split right after its binding keyword
        if line.trim_end().ends_with(" as") && i < lines.len() {
            let next = lines[i].trim();
            if !next.is_empty() && !next.starts_with("as") {
                line = format!("{} {}", line.trim_end(), next);
                i += 1;
            }
        }

        // drop the assignment, keep the acquisition
        if let Some(caps) = ASSIGNED_WITH.captures(&line) {
            line = format!("{}{}", &caps[1], &caps[2]);
        }

        // header missing its colon: close it and pull the block in
        let stripped = line.trim_start();
        if stripped.starts_with("with ")
            && !line.trim_end().ends_with(':')
            && !line.trim_end().ends_with(" as")
        {
            out.push(format!("{}:", line.trim_end()));
            while i < lines.len() && !lines[i].trim().is_empty() {
                out.push(format!("    {}", lines[i]));
                i += 1;
            }
            continue;
        }

        out.push(line);
    }

    out
}
