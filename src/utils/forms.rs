use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{FieldErrors, PortalError};

/// Account emails need a dotted top-level domain of two letters or more.
pub static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid regex")
});

/// First message per field. Nested struct errors are flattened under the
/// parent field name.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    collect(errors, None, &mut fields);
    fields
}

fn collect(errors: &ValidationErrors, parent: Option<&str>, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let name = match parent {
            Some(parent) => format!("{}.{}", parent, field),
            None => field.to_string(),
        };

        match kind {
            validator::ValidationErrorsKind::Field(errs) => {
                if let Some(first) = errs.first() {
                    let message = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("El campo {} es inválido", field));
                    out.insert(name, message);
                }
            }
            validator::ValidationErrorsKind::Struct(nested) => collect(nested, Some(&name), out),
            validator::ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect(nested, Some(&name), out);
                }
            }
        }
    }
}

impl From<ValidationErrors> for PortalError {
    fn from(errors: ValidationErrors) -> Self {
        PortalError::Validation(field_errors(&errors))
    }
}

/// Rejects empty and whitespace-only text.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Runs the derived rules and hands the value back on success.
pub fn validated<T: Validate>(value: T) -> Result<T, PortalError> {
    value.validate()?;
    Ok(value)
}

/// Adds a field error raised outside the derived rules.
pub fn merge(result: Result<(), ValidationErrors>, extra: FieldErrors) -> Result<(), PortalError> {
    let mut fields = match result {
        Ok(()) => FieldErrors::new(),
        Err(errors) => field_errors(&errors),
    };
    for (field, message) in extra {
        fields.entry(field).or_insert(message);
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(PortalError::Validation(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoginReqDto;

    #[test]
    fn collects_first_message_per_field() {
        let dto = LoginReqDto {
            email: "no-es-correo".into(),
            password: String::new(),
        };
        let Err(PortalError::Validation(fields)) = validated(dto) else {
            panic!("expected validation error");
        };
        assert_eq!(fields["email"], "Email inválido");
        assert_eq!(fields["password"], "La contraseña es requerida");
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(not_blank("  ").is_err());
        assert!(not_blank("IGSS").is_ok());
    }

    #[test]
    fn merge_keeps_derived_messages_first() {
        let mut extra = FieldErrors::new();
        extra.insert("period_end".into(), "La fecha fin es requerida".into());
        let Err(PortalError::Validation(fields)) = merge(Ok(()), extra) else {
            panic!("expected validation error");
        };
        assert_eq!(fields.len(), 1);

        assert!(merge(Ok(()), FieldErrors::new()).is_ok());
    }
}
