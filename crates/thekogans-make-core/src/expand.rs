use anyhow::Context as _;

use crate::call::{parse_call, parse_quoted};
use crate::context::Context;
use crate::cursor::Cursor;
use crate::errors::MakeResult;

/// Expand a string template such as `$(build_root)/lib/$(project)`.
///
/// `$(...)` calls are replaced by their result, `\` escapes are resolved, and `'...'` sections
/// contribute their contents (with the same substitutions applied inside). Everything else is
/// copied through. A literal `$` must be written `\$`.
pub fn expand(context: &dyn Context, format: &str) -> MakeResult<String> {
    expand_inner(context, format).with_context(|| format!("failed to expand '{format}'"))
}

fn expand_inner(context: &dyn Context, format: &str) -> MakeResult<String> {
    let mut cursor = Cursor::new(format);
    let mut text = String::with_capacity(format.len());
    while let Some(c) = cursor.peek() {
        match c {
            '\\' => text.push(cursor.escape()?),
            '\'' => text.push_str(&parse_quoted(&mut cursor, context)?),
            '$' => text.push_str(&parse_call(&mut cursor, context)?.to_string()),
            c => {
                text.push(c);
                cursor.bump();
            }
        }
    }
    Ok(text)
}
