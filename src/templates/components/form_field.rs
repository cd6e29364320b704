use crate::admin::resources::FieldSpec;
use crate::domain::validate::FieldKind;
use maud::{html, Markup};

/// One labelled input with its inline error line. Address fields are
/// rendered by the cascade component instead.
pub fn form_field(field: &FieldSpec, value: &str, error: Option<&str>) -> Markup {
    html! {
        div class="form-field" {
            label for=(field.name) { (field.label) }
            @match field.kind {
                FieldKind::Password => {
                    input type="password" id=(field.name) name=(field.name) value="";
                }
                FieldKind::Number { min, max } => {
                    input type="number" id=(field.name) name=(field.name)
                        value=(value) min=(min) max=(max);
                }
                FieldKind::Email => {
                    input type="text" id=(field.name) name=(field.name) value=(value);
                }
                FieldKind::Image => {
                    input type="file" id=(field.name) name=(field.name)
                        accept=".jpg,.jpeg,.png,.webp";
                    @if !value.is_empty() {
                        img src=(value) alt="current image" class="thumb";
                    }
                }
                _ => {
                    input type="text" id=(field.name) name=(field.name) value=(value);
                }
            }
            @if let Some(message) = error {
                span class="field-error" { (message) }
            }
        }
    }
}
