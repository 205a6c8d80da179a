//! The roll pipeline: draw, cache, filter, fetch, resolve.

use crate::context::EvalContext;
use crate::error::EngineResult;
use crate::registry::Lookup;
use crate::strategy::RollResult;
use crate::table::{TableDefinition, TableName};
use crate::template;

/// Evaluate a lookup result: roll a table, or render a constant.
pub fn evaluate_lookup(ctx: &mut EvalContext<'_>, found: Lookup) -> EngineResult<String> {
    match found {
        Lookup::Table(table) => roll_table(ctx, &table),
        Lookup::Constant(n) => Ok(n.to_string()),
    }
}

/// Roll `table` and resolve the fetched entry into its final text.
///
/// Whatever happens, the cache slot named after `table` is cleared on the
/// way out. That slot is not necessarily the one this roll read from: a
/// `reuse` table leaves its source's draw in place for later siblings.
pub fn roll_table(ctx: &mut EvalContext<'_>, table: &TableDefinition) -> EngineResult<String> {
    ctx.descend(&table.name)?;
    log::debug!("rolling \"{}\" at depth {}", table.name, ctx.depth());

    let output = resolve_roll(ctx, table);

    if ctx.cache.remove(table.name.as_str()).is_some() {
        log::trace!("dropped cached draw for \"{}\"", table.name);
    }
    ctx.ascend();
    output
}

fn resolve_roll(ctx: &mut EvalContext<'_>, table: &TableDefinition) -> EngineResult<String> {
    let raw = draw(ctx, table)?;
    let selector = table.filter.apply(&raw);
    if selector.is_empty() {
        return Ok(String::new());
    }

    match table.fetcher.fetch(&table.data, &selector, ctx.rng) {
        Some(entry) => template::interpolate(ctx, &entry),
        None => {
            log::debug!("\"{}\" has no entry for {selector}", table.name);
            Ok(String::new())
        }
    }
}

/// Produce the raw draw for `table`, honoring `reuse` and `store`.
///
/// A `reuse` table takes its source's cached draw; if the source has not
/// drawn yet, only the source's draw step runs to fill the cache.
pub fn draw(ctx: &mut EvalContext<'_>, table: &TableDefinition) -> EngineResult<RollResult> {
    let raw = match &table.reuse {
        Some(source) => shared_draw(ctx, source)?,
        None => table.roller.roll(&table.data, ctx.rng)?,
    };

    if table.store {
        ctx.cache.store(table.name.clone(), raw.clone());
    }
    Ok(raw)
}

fn shared_draw(ctx: &mut EvalContext<'_>, source: &TableName) -> EngineResult<RollResult> {
    if let Some(raw) = ctx.cache.get(source.as_str()) {
        log::trace!("reusing cached draw {raw} from \"{source}\"");
        return Ok(raw.clone());
    }

    let registry = ctx.registry;
    let source_table = registry.require(source.as_str())?;
    ctx.descend(source)?;
    let raw = draw(ctx, &source_table);
    ctx.ascend();
    raw
}
