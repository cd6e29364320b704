// src/domain/validate.rs
use regex::Regex;
use std::sync::OnceLock;

/// Shape of a single form field: drives both the rendered input type and
/// the synchronous per-field validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    PersonName,
    Phone,
    Email,
    Password,
    Number { min: i64, max: i64 },
    Image,
    Address,
}

fn person_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Vietnamese letters plus spaces, nothing else.
    RE.get_or_init(|| {
        Regex::new(
            r"^[a-zA-ZàáạảãâầấậẩẫăằắặẳẵèéẹẻẽêềếệểễìíịỉĩòóọỏõôồốộổỗơờớợởỡùúụủũưừứựửữỳýỵỷỹđÀÁẠẢÃÂẦẤẬẨẪĂẰẮẶẲẴÈÉẸẺẼÊỀẾỆỂỄÌÍỊỈĨÒÓỌỎÕÔỒỐỘỔỖƠỜỚỢỞỠÙÚỤỦŨƯỪỨỰỬỮỲÝỴỶỸĐ ]+$",
        )
        .unwrap()
    })
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^0\d{9}$").unwrap())
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

/// Validate one field value against its kind. Returns the error message
/// to show inline, or `None` when the value passes.
///
/// An empty optional field always passes; shape rules only apply once
/// something was typed.
pub fn check_field(label: &str, kind: FieldKind, required: bool, value: &str) -> Option<String> {
    let value = value.trim();

    if value.is_empty() {
        if required {
            return Some(format!("{label} must not be empty"));
        }
        return None;
    }

    match kind {
        FieldKind::Text | FieldKind::Password | FieldKind::Image | FieldKind::Address => None,
        FieldKind::PersonName => {
            if person_name_re().is_match(value) {
                None
            } else {
                Some(format!("{label} may only contain letters and spaces"))
            }
        }
        FieldKind::Phone => {
            if phone_re().is_match(value) {
                None
            } else {
                Some(format!("{label} must be 10 digits starting with 0"))
            }
        }
        FieldKind::Email => {
            if email_re().is_match(value) {
                None
            } else {
                Some(format!("{label} is not a valid email address"))
            }
        }
        FieldKind::Number { min, max } => match value.parse::<i64>() {
            Ok(n) if (min..=max).contains(&n) => None,
            Ok(_) => Some(format!("{label} must be between {min} and {max}")),
            Err(_) => Some(format!("{label} must be a number")),
        },
    }
}
