use crate::runtime::RegisterBank;

const QUOTE: char = '\'';

/// Renders a `msg` template against the registers.
///
/// Spaces and commas between segments are skipped. A `'quoted'` segment is copied up to
/// its closing quote (or the end of the template); a bare lowercase letter becomes the
/// decimal value of that register. Rendering stops at an embedded newline. Anything else
/// is ignored.
pub fn render(template: &str, registers: &RegisterBank) -> String {
    let mut out = String::new();
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        match c {
            '\n' => break,
            ' ' | '\t' | ',' => {}
            QUOTE => {
                for literal in chars.by_ref() {
                    if literal == QUOTE {
                        break;
                    }
                    out.push(literal);
                }
            }
            letter => {
                if let Some(value) = registers.get_letter(letter) {
                    out.push_str(&value.to_string());
                }
            }
        }
    }

    out
}
