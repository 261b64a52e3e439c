//! `$NAME` and `${NAME}` substitution in scalar text.

use std::sync::Arc;

use crate::error::{ParamError, ParamResult};

use super::Variables;

const fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Replace every `$NAME` and `${NAME}` in `template` with its value.
///
/// A bare name runs for as long as it consists of ASCII letters, digits and
/// underscores. A `$` that is not followed by a name or `{` is kept as is.
///
/// # Errors
///
/// Returns [`ParamError::UndefinedVariable`] for names missing from
/// `variables` and [`ParamError::MalformedTemplate`] for an unterminated or
/// empty `${`.
///
/// # Examples
///
/// ```
/// use tree_param::{Variables, expand_variables};
///
/// let vars = Variables::from([("test".to_owned(), "noot".to_owned())]);
/// assert_eq!(expand_variables("aap/$test/mies", &vars)?, "aap/noot/mies");
/// assert_eq!(expand_variables("aap${test}mies", &vars)?, "aapnootmies");
/// # Ok::<_, std::sync::Arc<tree_param::ParamError>>(())
/// ```
pub fn expand_variables(template: &str, variables: &Variables) -> ParamResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('$') {
        let (literal, tail) = rest.split_at(start);
        out.push_str(literal);
        let after = tail.get(1..).unwrap_or_default();

        let (name, remainder) = if let Some(braced) = after.strip_prefix('{') {
            let Some(end) = braced.find('}') else {
                return Err(malformed(template, "unterminated `${`"));
            };
            let (name, closing) = braced.split_at(end);
            if name.is_empty() {
                return Err(malformed(template, "empty variable name"));
            }
            (name, closing.get(1..).unwrap_or_default())
        } else {
            let end = after.find(|ch: char| !is_name_char(ch)).unwrap_or(after.len());
            after.split_at(end)
        };

        if name.is_empty() {
            out.push('$');
        } else {
            let Some(value) = variables.get(name) else {
                return Err(Arc::new(ParamError::UndefinedVariable {
                    name: name.to_owned(),
                    template: template.to_owned(),
                }));
            };
            out.push_str(value);
        }
        rest = remainder;
    }
    out.push_str(rest);

    tracing::trace!(template, expanded = %out, "expanded variables");
    Ok(out)
}

fn malformed(template: &str, message: &str) -> Arc<ParamError> {
    Arc::new(ParamError::MalformedTemplate {
        template: template.to_owned(),
        message: message.to_owned(),
    })
}
