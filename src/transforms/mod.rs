//! The repair transform catalogue.
//!
//! Each transform is a pure `&str -> Cow<str>` function addressing one defect
//! class, idempotent on text that has no defect of its class. Transforms that
//! change nothing return the input borrowed, so the driver holds at most one
//! extra allocation at a time.

use std::borrow::Cow;

use crate::diagnostic::Trail;

pub(crate) mod brackets;
pub(crate) mod commas;
pub(crate) mod guided;
pub(crate) mod keys;
pub(crate) mod normalize;
pub(crate) mod strings;
pub(crate) mod truncate;

/// Internal fix-point cap shared by the self-iterating transforms.
pub(crate) const MAX_FIXPOINT_ITERS: usize = 10;

/// A named pipeline step. The driver composes ordered slices of these so the
/// pass sequence is data, not hard-coded calls.
pub(crate) struct Transform {
    pub name: &'static str,
    pub run: for<'t> fn(&'t str, &mut Trail) -> Cow<'t, str>,
}

pub(crate) const WRAP_BARE_PAIRS: Transform = Transform {
    name: "wrap-bare-pairs",
    run: keys::wrap_bare_pairs,
};
pub(crate) const PROMOTE_STRINGIFIED_VALUES: Transform = Transform {
    name: "promote-stringified-values",
    run: strings::promote_stringified_values,
};
pub(crate) const REMOVE_STRAY_QUOTES: Transform = Transform {
    name: "remove-stray-quotes",
    run: strings::remove_stray_quotes_after_numbers,
};
pub(crate) const STRIP_COMMENTS: Transform = Transform {
    name: "strip-comments",
    run: normalize::strip_comments,
};
pub(crate) const NORMALIZE_LITERALS: Transform = Transform {
    name: "normalize-literals",
    run: normalize::normalize_literals,
};
pub(crate) const QUOTE_UNQUOTED_KEYS: Transform = Transform {
    name: "quote-unquoted-keys",
    run: keys::quote_unquoted_keys,
};
pub(crate) const COLLAPSE_DUPLICATE_KEYS: Transform = Transform {
    name: "collapse-duplicate-keys",
    run: keys::collapse_duplicate_keys,
};
pub(crate) const FILL_MISSING_VALUES: Transform = Transform {
    name: "fill-missing-values",
    run: keys::fill_missing_values,
};
pub(crate) const INSERT_MISSING_COMMAS: Transform = Transform {
    name: "insert-missing-commas",
    run: commas::insert_missing_commas,
};
pub(crate) const REMOVE_TRAILING_COMMAS: Transform = Transform {
    name: "remove-trailing-commas",
    run: commas::remove_trailing_commas,
};
pub(crate) const FIX_UNCLOSED_STRINGS: Transform = Transform {
    name: "fix-unclosed-strings",
    run: strings::fix_unclosed_strings,
};
pub(crate) const BALANCE_BRACKETS: Transform = Transform {
    name: "balance-brackets",
    run: brackets::balance_brackets,
};

/// The one-shot pre-normalization stage, also re-applied at the top of every
/// main pass because earlier passes may have exposed new structure.
pub(crate) const PRE_STAGE: &[Transform] = &[
    WRAP_BARE_PAIRS,
    PROMOTE_STRINGIFIED_VALUES,
    REMOVE_STRAY_QUOTES,
];

/// `Some(owned)` when the transform rewrote its input, `None` otherwise.
pub(crate) fn to_changed(result: Cow<'_, str>) -> Option<String> {
    match result {
        Cow::Borrowed(_) => None,
        Cow::Owned(s) => Some(s),
    }
}

/// Re-apply `step` until it stops changing the text, bounded by `cap`.
pub(crate) fn fixpoint<'t, F>(text: &'t str, cap: usize, step: F) -> Cow<'t, str>
where
    F: Fn(&str) -> Option<String>,
{
    let mut current: Option<String> = None;
    for _ in 0..cap {
        let next = step(current.as_deref().unwrap_or(text));
        match next {
            Some(s) => current = Some(s),
            None => break,
        }
    }
    match current {
        Some(s) => Cow::Owned(s),
        None => Cow::Borrowed(text),
    }
}
