//! Declarative request validation.
//!
//! Each input type declares a rule table: wire-level field name, rule kind
//! and an accessor. Rules are evaluated in order, at most one failure is
//! recorded per field, and the outcome is the first failing rule's message
//! plus a flag for "more than one field failed". Callers answer the
//! multi-failure case with a generic bad-payload response so the reply never
//! narrows down which fields were wrong.

pub type FieldGet<T> = for<'a> fn(&'a T) -> &'a str;

pub enum RuleKind<T> {
    /// Field must be non-empty.
    Required,
    /// Field must be a well-formed email address.
    Email,
    /// Field must equal another field of the same input.
    EqField {
        field: &'static str,
        get: FieldGet<T>,
    },
}

pub struct Rule<T> {
    /// Wire (serialized) name, used in error messages.
    pub field: &'static str,
    pub kind: RuleKind<T>,
    pub get: FieldGet<T>,
}

#[derive(Debug)]
pub struct ValidationFailure {
    pub message: String,
    pub multiple: bool,
}

pub fn validate<T>(input: &T, rules: &[Rule<T>]) -> Result<(), ValidationFailure> {
    let mut failures: Vec<String> = Vec::new();
    let mut failed_fields: Vec<&'static str> = Vec::new();

    for rule in rules {
        if failed_fields.contains(&rule.field) {
            continue;
        }

        let value = (rule.get)(input);
        let message = match &rule.kind {
            RuleKind::Required if value.is_empty() => Some(format!("{} is required", rule.field)),
            RuleKind::Email if !is_well_formed_email(value) => {
                Some(format!("{} should be a valid email address", rule.field))
            }
            RuleKind::EqField { field, get } if value != get(input) => {
                Some(format!("{} should be the same as {}", rule.field, field))
            }
            _ => None,
        };

        if let Some(message) = message {
            failed_fields.push(rule.field);
            failures.push(message);
        }
    }

    match failures.len() {
        0 => Ok(()),
        n => Err(ValidationFailure {
            message: failures.remove(0),
            multiple: n > 1,
        }),
    }
}

fn is_well_formed_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || value.contains(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Input {
        email: String,
        password: String,
        confirm_password: String,
    }

    fn rules() -> Vec<Rule<Input>> {
        vec![
            Rule {
                field: "email",
                kind: RuleKind::Required,
                get: |i| &i.email,
            },
            Rule {
                field: "email",
                kind: RuleKind::Email,
                get: |i| &i.email,
            },
            Rule {
                field: "password",
                kind: RuleKind::Required,
                get: |i| &i.password,
            },
            Rule {
                field: "confirm_password",
                kind: RuleKind::EqField {
                    field: "password",
                    get: |i| &i.password,
                },
                get: |i| &i.confirm_password,
            },
        ]
    }

    fn input(email: &str, password: &str, confirm: &str) -> Input {
        Input {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn valid_input_passes() {
        let result = validate(&input("alozyuche@gmail.com", "pw", "pw"), &rules());
        assert!(result.is_ok());
    }

    #[test]
    fn single_bad_field_reports_its_message() {
        let failure = validate(&input("Not-AN-Email", "pw", "pw"), &rules()).unwrap_err();
        assert_eq!(failure.message, "email should be a valid email address");
        assert!(!failure.multiple);
    }

    #[test]
    fn missing_field_reports_required() {
        let failure = validate(&input("", "pw", "pw"), &rules()).unwrap_err();
        assert_eq!(failure.message, "email is required");
        assert!(!failure.multiple);
    }

    #[test]
    fn at_most_one_failure_per_field() {
        // Empty email fails Required only, not Email as well.
        let failure = validate(&input("", "pw", "pw"), &rules()).unwrap_err();
        assert!(!failure.multiple);
    }

    #[test]
    fn two_bad_fields_set_the_multiple_flag() {
        let failure = validate(&input("Not-AN-Email", "pw", "other"), &rules()).unwrap_err();
        assert_eq!(failure.message, "email should be a valid email address");
        assert!(failure.multiple);
    }

    #[test]
    fn eqfield_names_the_other_field() {
        let failure =
            validate(&input("alozyuche@gmail.com", "pws", "pw"), &rules()).unwrap_err();
        assert_eq!(failure.message, "confirm_password should be the same as password");
        assert!(!failure.multiple);
    }

    #[test]
    fn email_shapes() {
        assert!(is_well_formed_email("a@b.co"));
        assert!(!is_well_formed_email("a@b"));
        assert!(!is_well_formed_email("@b.co"));
        assert!(!is_well_formed_email("a@.co"));
        assert!(!is_well_formed_email("a b@c.co"));
    }
}
