// SPDX-License-Identifier: MIT

//! Git hooks management: script templates, installation, verification
//! and post-merge self-healing.

mod manager;
mod templates;

pub use manager::{HookManager, HookRecord, PROBE_TIMEOUT};
pub use templates::HookTemplate;
