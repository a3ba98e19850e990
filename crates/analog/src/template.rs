//! printf-style positional templates.
//!
//! A placeholder reads `%[argnum$][flags][width][.precision]conversion`:
//!
//! - `argnum$` picks a value by 1-based position without moving the
//!   sequential cursor
//! - flags: `-` left-justifies, `+` signs positive numbers, `0` or a space
//!   selects the padding character, `'c` pads with any character `c`
//! - `width` is the minimum width in characters
//! - `.precision` truncates `%s` and sets the decimals of `%f`
//!
//! Conversions are `%s`, `%d`/`%i`, `%u`, `%f`/`%F`, `%x`/`%X` and the `%%`
//! escape. Values left over once the template is exhausted are ignored, as
//! `sprintf` does.

use std::iter::Peekable;
use std::str::CharIndices;

use serde_json::Value;

use crate::error::FormatError;

const DEFAULT_FLOAT_PRECISION: usize = 6;

type Cursor<'t> = Peekable<CharIndices<'t>>;

/// Parsed `[flags][width][.precision]` of one placeholder
#[derive(Debug, Clone, Copy)]
struct Spec
{
    left: bool,
    plus: bool,
    pad: char,
    width: usize,
    precision: Option<usize>,
}

impl Default for Spec
{
    fn default() -> Self
    {
        Self {
            left: false,
            plus: false,
            pad: ' ',
            width: 0,
            precision: None,
        }
    }
}

/// Substitute `args` into `template` in order.
pub(crate) fn sprintf(template: &str, args: &[(&'static str, Value)]) -> Result<String, FormatError>
{
    let mut out = String::with_capacity(template.len() + 32);
    let mut chars = template.char_indices().peekable();
    let mut next_arg = 0;

    while let Some((offset, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        if let Some((_, '%')) = chars.peek() {
            chars.next();
            out.push('%');
            continue;
        }

        let position = match argument_number(&mut chars) {
            Some(0) => return Err(FormatError::InvalidArgumentNumber { offset }),
            Some(n) => n - 1,
            None => {
                next_arg += 1;
                next_arg - 1
            }
        };
        let spec = parse_spec(&mut chars, offset)?;

        let Some((_, conversion)) = chars.next() else {
            return Err(FormatError::Incomplete { offset });
        };
        if !matches!(conversion, 's' | 'd' | 'i' | 'u' | 'f' | 'F' | 'x' | 'X') {
            return Err(FormatError::UnknownConversion { conversion, offset });
        }

        let Some((field, value)) = args.get(position) else {
            return Err(FormatError::MissingArgument {
                index: position + 1,
                supplied: args.len(),
            });
        };

        let field = *field;
        let mismatch = || FormatError::TypeMismatch { conversion, field };
        let text = match conversion {
            's' => {
                let text = display_value(value);
                match spec.precision {
                    Some(max) => text.chars().take(max).collect(),
                    None => text,
                }
            }
            'd' | 'i' => signed(as_integer(value).ok_or_else(mismatch)?, spec.plus),
            'u' => as_integer(value).filter(|n| *n >= 0).ok_or_else(mismatch)?.to_string(),
            'f' | 'F' => {
                let f = as_float(value).ok_or_else(mismatch)?;
                let text = format!("{:.*}", spec.precision.unwrap_or(DEFAULT_FLOAT_PRECISION), f);
                if spec.plus && f >= 0.0 { format!("+{text}") } else { text }
            }
            'x' => format!("{:x}", as_integer(value).ok_or_else(mismatch)?),
            'X' => format!("{:X}", as_integer(value).ok_or_else(mismatch)?),
            _ => unreachable!("conversion validated above"),
        };
        pad_into(&mut out, &text, spec, conversion != 's');
    }

    Ok(out)
}

/// Consume `digits$` if the placeholder starts with one.
fn argument_number(chars: &mut Cursor<'_>) -> Option<usize>
{
    let mut lookahead = chars.clone();
    let number = digits(&mut lookahead)?;
    if let Some((_, '$')) = lookahead.next() {
        *chars = lookahead;
        Some(number)
    } else {
        None
    }
}

fn parse_spec(chars: &mut Cursor<'_>, offset: usize) -> Result<Spec, FormatError>
{
    let mut spec = Spec::default();

    while let Some(&(_, flag)) = chars.peek() {
        match flag {
            '-' => spec.left = true,
            '+' => spec.plus = true,
            '0' | ' ' => spec.pad = flag,
            '\'' => {
                chars.next();
                let Some((_, pad)) = chars.peek().copied() else {
                    return Err(FormatError::Incomplete { offset });
                };
                spec.pad = pad;
            }
            _ => break,
        }
        chars.next();
    }

    spec.width = digits(chars).unwrap_or(0);

    if let Some((_, '.')) = chars.peek() {
        chars.next();
        spec.precision = Some(digits(chars).unwrap_or(0));
    }

    Ok(spec)
}

fn digits(chars: &mut Cursor<'_>) -> Option<usize>
{
    let mut value: Option<usize> = None;
    while let Some(&(_, d)) = chars.peek() {
        let Some(digit) = d.to_digit(10) else { break };
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
        chars.next();
    }
    value
}

fn signed(n: i64, plus: bool) -> String
{
    if plus && n >= 0 { format!("+{n}") } else { n.to_string() }
}

/// Append `text` padded to the spec width.
///
/// Zero padding of a right-aligned number goes between the sign and the
/// digits. Left alignment always pads with spaces when `0` was asked for.
fn pad_into(out: &mut String, text: &str, spec: Spec, numeric: bool)
{
    let len = text.chars().count();
    let fill = spec.width.saturating_sub(len);
    if fill == 0 {
        out.push_str(text);
        return;
    }

    if spec.left {
        let pad = if numeric && spec.pad == '0' { ' ' } else { spec.pad };
        out.push_str(text);
        out.extend(std::iter::repeat_n(pad, fill));
        return;
    }

    let (sign, digits) = match text.strip_prefix(['-', '+']) {
        Some(rest) if numeric && spec.pad == '0' => text.split_at(text.len() - rest.len()),
        _ => ("", text),
    };
    out.push_str(sign);
    out.extend(std::iter::repeat_n(spec.pad, fill));
    out.push_str(digits);
}

/// Text form of a message value: strings raw, `null` empty, everything else as JSON.
pub(crate) fn display_value(value: &Value) -> String
{
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn as_integer(value: &Value) -> Option<i64>
{
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn as_float(value: &Value) -> Option<f64>
{
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    }
}

#[cfg(test)]
mod tests
{
    use serde_json::json;

    use super::*;

    fn args() -> Vec<(&'static str, Value)>
    {
        vec![
            ("message", json!("Test")),
            ("level", json!(1)),
            ("machine", json!("amachine")),
            ("date", json!("2024-03-09 14:05:07")),
        ]
    }

    #[test]
    fn test_sprintf_substitutes_in_order()
    {
        let out = sprintf("%s / %d / %s / %s", &args()).unwrap();
        assert_eq!(out, "Test / 1 / amachine / 2024-03-09 14:05:07");
    }

    #[test]
    fn test_sprintf_ignores_extra_values()
    {
        assert_eq!(sprintf("%s | %s", &args()).unwrap(), "Test | 1");
        assert_eq!(sprintf("no placeholders", &args()).unwrap(), "no placeholders");
    }

    #[test]
    fn test_sprintf_percent_escape()
    {
        assert_eq!(sprintf("100%% %s", &args()).unwrap(), "100% Test");
    }

    #[test]
    fn test_sprintf_precision()
    {
        let values = vec![("message", json!("abcdef")), ("level", json!(2.5))];
        assert_eq!(sprintf("%.3s %.2f", &values).unwrap(), "abc 2.50");
        assert_eq!(sprintf("%f", &values[1..]).unwrap(), "2.500000");
    }

    #[test]
    fn test_sprintf_hex()
    {
        let values = vec![("level", json!(255)), ("level", json!(255))];
        assert_eq!(sprintf("%x %X", &values).unwrap(), "ff FF");
    }

    #[test]
    fn test_sprintf_too_many_placeholders()
    {
        let err = sprintf("%s %s %s %s %s", &args()).unwrap_err();
        assert_eq!(err, FormatError::MissingArgument { index: 5, supplied: 4 });
    }

    #[test]
    fn test_sprintf_unknown_conversion()
    {
        let err = sprintf("ab%q", &args()).unwrap_err();
        assert_eq!(err, FormatError::UnknownConversion { conversion: 'q', offset: 2 });
    }

    #[test]
    fn test_sprintf_trailing_percent()
    {
        assert_eq!(sprintf("oops %", &args()).unwrap_err(), FormatError::Incomplete { offset: 5 });
        assert_eq!(sprintf("%.2", &args()).unwrap_err(), FormatError::Incomplete { offset: 0 });
    }

    #[test]
    fn test_sprintf_numeric_conversion_rejects_text()
    {
        let err = sprintf("%d", &args()).unwrap_err();
        assert_eq!(err, FormatError::TypeMismatch { conversion: 'd', field: "message" });
    }

    #[test]
    fn test_sprintf_unsigned_rejects_negative()
    {
        let values = vec![("level", json!(-1))];
        assert!(sprintf("%u", &values).is_err());
        assert_eq!(sprintf("%d", &values).unwrap(), "-1");
    }

    #[test]
    fn test_sprintf_width_and_alignment()
    {
        let values = vec![("message", json!("disk")), ("level", json!(1))];
        assert_eq!(sprintf("[%8s]", &values).unwrap(), "[    disk]");
        assert_eq!(sprintf("[%-8s|%d]", &values).unwrap(), "[disk    |1]");
        assert_eq!(sprintf("[%2s]", &values).unwrap(), "[disk]");
        assert_eq!(sprintf("[%'*6s]", &values).unwrap(), "[**disk]");
        assert_eq!(sprintf("[%-'.6s]", &values).unwrap(), "[disk..]");
    }

    #[test]
    fn test_sprintf_zero_padding_and_sign()
    {
        let values = vec![("level", json!(1)), ("level", json!(-7)), ("level", json!(2.5))];
        assert_eq!(sprintf("%02d", &values).unwrap(), "01");
        assert_eq!(sprintf("%+d", &values).unwrap(), "+1");
        assert_eq!(sprintf("%2$04d", &values).unwrap(), "-007");
        assert_eq!(sprintf("%3$+07.2f", &values).unwrap(), "+002.50");
        assert_eq!(sprintf("[%-04d]", &values).unwrap(), "[1   ]");
        assert_eq!(sprintf("%2$+d", &values).unwrap(), "-7");
    }

    #[test]
    fn test_sprintf_argument_numbers()
    {
        assert_eq!(sprintf("%1$s", &args()).unwrap(), "Test");
        assert_eq!(sprintf("%3$s@%1$s", &args()).unwrap(), "amachine@Test");
        // Numbered placeholders leave the sequential cursor alone
        assert_eq!(sprintf("%2$d %s %s", &args()).unwrap(), "1 Test 1");
        assert_eq!(
            sprintf("%5$s", &args()).unwrap_err(),
            FormatError::MissingArgument { index: 5, supplied: 4 }
        );
        assert_eq!(
            sprintf("x%0$s", &args()).unwrap_err(),
            FormatError::InvalidArgumentNumber { offset: 1 }
        );
    }

    #[test]
    fn test_sprintf_dangling_pad_character()
    {
        assert_eq!(sprintf("%'", &args()).unwrap_err(), FormatError::Incomplete { offset: 0 });
    }

    #[test]
    fn test_display_value()
    {
        assert_eq!(display_value(&json!("raw")), "raw");
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(display_value(&json!(12)), "12");
        assert_eq!(display_value(&json!({"k": 1})), "{\"k\":1}");
    }
}
