use validator::{ValidationErrors, ValidationErrorsKind};

use super::app_error::ValidationIssue;

/// Flattens nested validator output into one issue per failed check, sorted by field path.
///
/// Nested structs extend the path with `.field`, list items with `[index]`.
pub(super) fn flatten_validation_errors(errors: &ValidationErrors) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut pending: Vec<(String, &ValidationErrors)> = vec![(String::new(), errors)];

    while let Some((prefix, errors)) = pending.pop() {
        for (field, kind) in errors.errors() {
            let path = if prefix.is_empty() {
                field.to_string()
            } else {
                format!("{prefix}.{field}")
            };

            match kind {
                ValidationErrorsKind::Field(failures) => {
                    issues.extend(failures.iter().map(|failure| ValidationIssue {
                        field: path.clone(),
                        message: failure
                            .message
                            .as_deref()
                            .map_or_else(|| format!("{path} is invalid"), str::to_string),
                        code: failure.code.to_string(),
                    }));
                }
                ValidationErrorsKind::Struct(nested) => pending.push((path, &**nested)),
                ValidationErrorsKind::List(items) => {
                    for (index, nested) in items {
                        pending.push((format!("{path}[{index}]"), &**nested));
                    }
                }
            }
        }
    }

    issues.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    issues
}
