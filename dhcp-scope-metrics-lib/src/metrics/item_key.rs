//! Parsing of monitoring-host item keys such as `windows_dhcp.scope_free[10.0.0.0]`.

use super::MetricRequest;
use crate::Result;
use core::iter::Peekable;
use core::str::Chars;
use ohno::bail;

/// Parse an item key of the form `key` or `key[param1,param2,...]`.
///
/// Parameters may be double-quoted, in which case they can contain `,` and `]`,
/// and `\"` stands for a literal quote. Leading spaces before a parameter are skipped.
/// `key[]` yields a single empty parameter.
pub fn parse_item_key(text: &str) -> Result<MetricRequest> {
    let (key, params) = match text.split_once('[') {
        None => (text, Vec::new()),
        Some((key, rest)) => {
            let Some(body) = rest.strip_suffix(']') else {
                bail!("item key '{text}' is missing its closing ']'");
            };
            (key, parse_params(body, text)?)
        }
    };

    if key.is_empty() {
        bail!("item key '{text}' has an empty key");
    }

    if let Some(c) = key.chars().find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))) {
        bail!("item key '{text}' contains invalid character '{c}' in its key");
    }

    Ok(MetricRequest::new(key, params))
}

fn parse_params(body: &str, text: &str) -> Result<Vec<String>> {
    let mut params = Vec::new();
    let mut chars = body.chars().peekable();

    loop {
        skip_spaces(&mut chars);

        let param = if chars.next_if_eq(&'"').is_some() {
            let quoted = parse_quoted(&mut chars, text)?;
            skip_spaces(&mut chars);
            quoted
        } else {
            let mut param = String::new();
            while let Some(c) = chars.next_if(|c| *c != ',') {
                param.push(c);
            }
            param
        };

        params.push(param);

        match chars.next() {
            None => return Ok(params),
            Some(',') => {}
            Some(c) => bail!("unexpected character '{c}' after quoted parameter in item key '{text}'"),
        }
    }
}

fn parse_quoted(chars: &mut Peekable<Chars<'_>>, text: &str) -> Result<String> {
    let mut param = String::new();
    loop {
        match chars.next() {
            None => bail!("unterminated quoted parameter in item key '{text}'"),
            Some('\\') if chars.next_if_eq(&'"').is_some() => param.push('"'),
            Some('"') => return Ok(param),
            Some(c) => param.push(c),
        }
    }
}

fn skip_spaces(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if_eq(&' ').is_some() {}
}
