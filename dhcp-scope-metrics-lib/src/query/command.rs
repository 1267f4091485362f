use super::BuildError;
use crate::metrics::{CommandTemplate, MetricDef, MetricRequest, SCOPE_ID_SLOT, lookup};

/// A command ready to be handed to an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltCommand {
    pub def: &'static MetricDef,
    pub text: String,
    pub scope_id: Option<String>,
}

/// Map a request onto the PowerShell command text for its metric.
///
/// Trailing empty parameters are ignored, since hosts send `key[]` as one empty
/// parameter. A scope identifier may only contain ASCII alphanumerics and `.` `:` `-` `_`,
/// and is inserted as a single-quoted PowerShell literal, so it can never name another
/// parameter or terminate the pipeline.
pub fn build_command(request: &MetricRequest) -> Result<BuiltCommand, BuildError> {
    let def = lookup(request.key()).ok_or(BuildError::UnknownKey)?;
    let params = significant_params(request.params());

    match def.template {
        CommandTemplate::Fixed(text) => {
            reject_surplus(params, 0)?;
            Ok(BuiltCommand {
                def,
                text: text.to_string(),
                scope_id: None,
            })
        }

        CommandTemplate::ScopeId(text) => {
            let scope_id = match params.first() {
                Some(scope_id) if !scope_id.is_empty() => scope_id,
                _ => return Err(BuildError::MissingParameter { name: "scope_id" }),
            };

            reject_surplus(params, 1)?;

            if !is_opaque_token(scope_id) {
                return Err(BuildError::InvalidParameter {
                    name: "scope_id",
                    value: scope_id.clone(),
                });
            }

            Ok(BuiltCommand {
                def,
                text: text.replace(SCOPE_ID_SLOT, &format!("'{scope_id}'")),
                scope_id: Some(scope_id.clone()),
            })
        }
    }
}

fn significant_params(params: &[String]) -> &[String] {
    let len = params.iter().rposition(|param| !param.is_empty()).map_or(0, |last| last + 1);
    &params[..len]
}

fn reject_surplus(params: &[String], expected: usize) -> Result<(), BuildError> {
    match params.iter().enumerate().skip(expected).find(|(_, param)| !param.is_empty()) {
        Some((position, value)) => Err(BuildError::UnexpectedParameter {
            position,
            value: value.clone(),
        }),
        None => Ok(()),
    }
}

fn is_opaque_token(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b':' | b'-' | b'_'))
}
