//! Interactive form filling on a line-based terminal.

use std::io::{BufRead, Write};

use anyhow::Result;
use warc_core::{FormController, Page};

/// Asks for every field of the page in schema order.
///
/// An empty answer keeps the current value. Input ending early keeps the
/// remaining fields as they are.
pub fn fill_form<P: Page>(
    controller: &mut FormController<P>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let fields: Vec<_> = controller
        .form()
        .entries()
        .map(|(spec, value)| (spec, value.to_string()))
        .collect();

    for (spec, current) in fields {
        writeln!(output, "{} ({})", spec.label(), spec.kind)?;
        writeln!(output, "  {}", spec.description)?;
        if current.is_empty() {
            write!(output, "> ")?;
        } else {
            write!(output, "[{current}] > ")?;
        }
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }
        let answer = line.trim();
        if !answer.is_empty() {
            controller.update_field(spec.name, answer)?;
        }
    }
    Ok(())
}
