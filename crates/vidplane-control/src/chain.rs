//! Filter chain membership
//!
//! The three chain variables (`video-filter`, `sub-source`, `sub-filter`)
//! hold a colon-separated ordered list of module names. Toggling a module
//! edits the list surgically: enabling appends only if absent, disabling
//! removes the exact token and strips the separator it leaves behind, so a
//! toggle round-trip restores the exact prior string.

use std::path::PathBuf;

/// Which chain a filter module belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKind {
    /// Video filters, applied to the picture
    VideoFilter,
    /// Subpicture sources, generating overlays
    SubSource,
    /// Subpicture filters, applied to overlays
    SubFilter,
}

impl ChainKind {
    /// The control variable holding this chain
    #[must_use]
    pub fn variable(self) -> crate::variables::VarId {
        match self {
            ChainKind::VideoFilter => crate::variables::VarId::VideoFilter,
            ChainKind::SubSource => crate::variables::VarId::SubSource,
            ChainKind::SubFilter => crate::variables::VarId::SubFilter,
        }
    }
}

/// Resolves which chain accepts a module
///
/// External collaborator seam over the host's module registry: the host
/// knows what capability each loadable module provides.
pub trait FilterRegistry {
    /// The chain `module` belongs to, or `None` for unknown modules
    fn classify(&self, module: &str) -> Option<ChainKind>;
}

/// Persists a chain string back to the host configuration
///
/// Saving is an explicit, caller-controlled side effect of toggling a
/// filter; it never happens implicitly.
pub trait ConfigStore {
    /// Store `value` under the configuration key `key`
    fn put_string(&self, key: &str, value: &str);

    /// Where the configuration lives, for diagnostics
    fn location(&self) -> Option<PathBuf> {
        None
    }
}

/// Append `module` to the chain unless it is already a member
///
/// Returns `None` when the chain already contains the exact token
/// (duplicates are never created; existing order is preserved).
#[must_use]
pub fn append_module(chain: &str, module: &str) -> Option<String> {
    if chain.split(':').any(|part| part == module) {
        return None;
    }
    if chain.is_empty() {
        Some(module.to_string())
    } else {
        Some(format!("{chain}:{module}"))
    }
}

/// Remove the exact `module` token from the chain
///
/// Returns `None` when the chain does not contain the token. The separator
/// adjacent to the removed token goes with it, and a superfluous trailing
/// separator is stripped.
#[must_use]
pub fn remove_module(chain: &str, module: &str) -> Option<String> {
    let mut start = None;
    let mut offset = 0;
    for part in chain.split(':') {
        if part == module {
            start = Some(offset);
            break;
        }
        offset += part.len() + 1;
    }
    let start = start?;
    let end = start + module.len();

    let mut out = String::with_capacity(chain.len());
    out.push_str(&chain[..start]);
    let rest = &chain[end..];
    out.push_str(rest.strip_prefix(':').unwrap_or(rest));
    if out.ends_with(':') {
        out.pop();
    }
    Some(out)
}
