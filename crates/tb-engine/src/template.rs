//! Template interpolation of `${...}` placeholders.
//!
//! A placeholder payload resolves, in order, to a registered table, a dice
//! expression, or itself. Unresolved payloads pass through verbatim so
//! ordinary prose survives interpolation.

use once_cell::sync::Lazy;
use regex::Regex;
use tb_dice::DiceExpr;

use crate::context::EvalContext;
use crate::error::EngineResult;
use crate::pipeline;

/// Opening marker of a placeholder.
pub const OPEN: &str = "${";

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]*)\}").unwrap());

/// Resolve caller-supplied text.
///
/// Text without any `${` is treated as a single bare payload, so `orcs` and
/// `2d6` resolve the same way `${orcs}` and `${2d6}` would.
pub fn evaluate(ctx: &mut EvalContext<'_>, text: &str) -> EngineResult<String> {
    if text.contains(OPEN) {
        interpolate(ctx, text)
    } else {
        resolve_payload(ctx, text)
    }
}

/// Replace every placeholder in `text`, left to right.
pub fn interpolate(ctx: &mut EvalContext<'_>, text: &str) -> EngineResult<String> {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for span in placeholders(text) {
        output.push_str(&text[last..span.start]);
        output.push_str(&resolve_payload(ctx, span.payload)?);
        last = span.end;
    }
    output.push_str(&text[last..]);
    Ok(output)
}

/// Resolve one payload: table, then dice, then the payload itself.
pub fn resolve_payload(ctx: &mut EvalContext<'_>, payload: &str) -> EngineResult<String> {
    if let Some(found) = ctx.registry.lookup(payload, true)? {
        return pipeline::evaluate_lookup(ctx, found);
    }
    if let Some(expr) = DiceExpr::parse(payload) {
        let total = expr.roll_total(ctx.rng);
        log::trace!("{expr} rolled {total}");
        return Ok(total.to_string());
    }
    Ok(payload.to_string())
}

/// A placeholder located in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'t> {
    /// Byte offset of the `${`.
    pub start: usize,
    /// Byte offset just past the closing `}`.
    pub end: usize,
    /// Text between the markers.
    pub payload: &'t str,
}

/// Find the placeholders in `text`.
///
/// Placeholders do not nest. In `${a ${b}` only `${b}` is a placeholder and
/// `${a ` is literal text.
pub fn placeholders(text: &str) -> Vec<Placeholder<'_>> {
    PLACEHOLDER_RE
        .find_iter(text)
        .map(|m| {
            let inner = &text[m.start() + OPEN.len()..m.end() - 1];
            let start = match inner.rfind(OPEN) {
                Some(offset) => m.start() + OPEN.len() + offset,
                None => m.start(),
            };
            Placeholder {
                start,
                end: m.end(),
                payload: &text[start + OPEN.len()..m.end() - 1],
            }
        })
        .collect()
}
