// src/admin/controller.rs
//
// The one generic paged-CRUD controller behind every admin screen:
// list / create / update / delete over a remote collection, with inline
// field validation and 409 conflict-token mapping.
use crate::admin::resources::{DeleteMode, ResourceSpec};
use crate::api::models::Paged;
use crate::api::{Api, ApiError, ApiRequest, FilePart, Method, MultipartForm};
use crate::domain::validate::{check_field, FieldKind};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub type ValidationErrorMap = BTreeMap<String, String>;

/// Client-local staging copy of an entity mid-edit. Created when a form
/// opens, mutated per input, discarded on abandon or successful submit.
#[derive(Debug, Clone, Default)]
pub struct FormDraft {
    pub id: Option<String>,
    pub values: BTreeMap<String, String>,
    pub upload: Option<FilePart>,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Saved,
    /// Validation or conflict failure; the form re-renders with these
    /// field errors and no entity was persisted.
    Invalid(ValidationErrorMap),
}

pub struct ResourceController<'a> {
    api: &'a Api,
    spec: &'static ResourceSpec,
    bearer: Option<String>,
}

impl<'a> ResourceController<'a> {
    pub fn new(api: &'a Api, spec: &'static ResourceSpec, bearer: Option<String>) -> Self {
        Self { api, spec, bearer }
    }

    pub fn spec(&self) -> &'static ResourceSpec {
        self.spec
    }

    /// Fetch one page. `current_page` is clamped to >= 1 and an empty
    /// keyword is omitted from the request entirely, never sent as "".
    pub fn list(
        &self,
        current_page: u32,
        page_size: u32,
        keyword: Option<&str>,
    ) -> Result<Paged<Value>, ApiError> {
        let page = current_page.max(1);

        let mut req = ApiRequest::new(Method::Get, format!("{}/paged", self.spec.base_path))
            .query("currentPage", page.to_string())
            .query("pageSize", page_size.to_string())
            .bearer(self.bearer.clone());

        if let Some(keyword) = keyword.map(str::trim).filter(|k| !k.is_empty()) {
            req = req.query("keyword", keyword);
        }

        self.api.get_json(&req)
    }

    /// Full unpaged listing, used by the spreadsheet export.
    pub fn fetch_all(&self) -> Result<Vec<Value>, ApiError> {
        let req = ApiRequest::new(Method::Get, self.spec.base_path).bearer(self.bearer.clone());
        self.api.get_json(&req)
    }

    pub fn fetch_one(&self, id: &str) -> Result<Value, ApiError> {
        let req = ApiRequest::new(Method::Get, format!("{}/{id}", self.spec.base_path))
            .bearer(self.bearer.clone());
        self.api.get_json(&req)
    }

    /// Fresh draft with type defaults and a clean error map.
    pub fn open_create(&self) -> FormDraft {
        let mut draft = FormDraft::default();
        for field in self.spec.fields {
            draft.values.insert(field.name.to_string(), String::new());
        }
        draft
    }

    /// Draft seeded from an existing entity; write-only fields (password)
    /// stay blank.
    pub fn open_edit(&self, entity: &Value) -> FormDraft {
        let mut draft = self.open_create();
        draft.id = entity
            .get("id")
            .map(json_scalar_to_string)
            .filter(|s| !s.is_empty());

        for field in self.spec.fields {
            if field.write_only {
                continue;
            }
            if let Some(value) = entity.get(field.name) {
                draft
                    .values
                    .insert(field.name.to_string(), json_scalar_to_string(value));
            }
        }
        draft
    }

    /// Per-keystroke contract: store the value, then update exactly this
    /// field's slot in the error map. Typing is never blocked.
    pub fn field_change(
        &self,
        draft: &mut FormDraft,
        errors: &mut ValidationErrorMap,
        name: &str,
        value: &str,
    ) {
        let Some(field) = self.spec.fields.iter().find(|f| f.name == name) else {
            return;
        };

        draft.values.insert(name.to_string(), value.to_string());

        match check_field(field.label, field.kind, field.required, value) {
            Some(message) => {
                errors.insert(name.to_string(), message);
            }
            None => {
                errors.remove(name);
            }
        }
    }

    /// Re-validate every field. A password already stored server-side is
    /// not required again when editing.
    pub fn validate(&self, draft: &FormDraft) -> ValidationErrorMap {
        let mut errors = ValidationErrorMap::new();
        let editing = draft.id.is_some();

        for field in self.spec.fields {
            let required = field.required && !(editing && field.write_only);
            // Image presence is carried by the upload part, not a text value.
            if field.kind == FieldKind::Image {
                let staged = draft.upload.is_some()
                    || draft
                        .values
                        .get(field.name)
                        .is_some_and(|v| !v.trim().is_empty());
                if required && !staged && !editing {
                    errors.insert(
                        field.name.to_string(),
                        format!("{} must not be empty", field.label),
                    );
                }
                continue;
            }

            let value = draft.values.get(field.name).map(String::as_str).unwrap_or("");
            if let Some(message) = check_field(field.label, field.kind, required, value) {
                errors.insert(field.name.to_string(), message);
            }
        }
        errors
    }

    /// Validate, then create (POST, 201) or update (PUT, per-resource
    /// status) depending on id presence. Any validation error aborts
    /// before the network; a 409 comes back as field errors when its
    /// tokens are mappable.
    pub fn submit(&self, draft: &FormDraft) -> Result<SubmitOutcome, ApiError> {
        let errors = self.validate(draft);
        if !errors.is_empty() {
            return Ok(SubmitOutcome::Invalid(errors));
        }

        let req = match &draft.id {
            Some(id) => ApiRequest::new(Method::Put, format!("{}/{id}", self.spec.base_path)),
            None => ApiRequest::new(Method::Post, self.spec.base_path),
        };
        let expected = if draft.id.is_some() {
            self.spec.update_status
        } else {
            201
        };

        let req = self
            .attach_body(req, draft)
            .bearer(self.bearer.clone());

        match self.api.send_expect(&req, expected) {
            Ok(()) => Ok(SubmitOutcome::Saved),
            Err(ApiError::Conflict(tokens)) => {
                let mapped = self.map_conflict_tokens(&tokens);
                if mapped.is_empty() {
                    Err(ApiError::Conflict(tokens))
                } else {
                    Ok(SubmitOutcome::Invalid(mapped))
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Soft delete flips status via PUT, hard delete removes the row;
    /// both expect 204.
    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        let req = match self.spec.delete {
            DeleteMode::Soft => ApiRequest::new(
                Method::Put,
                format!("{}/SoftDelete/{id}", self.spec.base_path),
            ),
            DeleteMode::Hard => {
                ApiRequest::new(Method::Delete, format!("{}/{id}", self.spec.base_path))
            }
        };
        self.api.send_expect(&req.bearer(self.bearer.clone()), 204)
    }

    /// Each 409 token that contains a field's conflict marker becomes
    /// that field's error; other fields are untouched.
    fn map_conflict_tokens(&self, tokens: &[String]) -> ValidationErrorMap {
        let mut errors = ValidationErrorMap::new();
        for token in tokens {
            for field in self.spec.fields {
                let Some(marker) = field.conflict_token else {
                    continue;
                };
                if token.contains(marker) {
                    errors.insert(
                        field.name.to_string(),
                        format!("{} already exists", field.label),
                    );
                }
            }
        }
        errors
    }

    /// Multipart when a binary asset is staged, JSON otherwise.
    fn attach_body(&self, req: ApiRequest, draft: &FormDraft) -> ApiRequest {
        if let Some(file) = &draft.upload {
            let mut form = MultipartForm {
                fields: Vec::new(),
                file: Some(file.clone()),
            };
            if let Some(id) = &draft.id {
                form.fields.push(("id".to_string(), id.clone()));
            }
            for field in self.spec.fields {
                if field.kind == FieldKind::Image {
                    continue;
                }
                let value = draft.values.get(field.name).cloned().unwrap_or_default();
                form.fields.push((field.name.to_string(), value));
            }
            return req.multipart(form);
        }

        let mut body = Map::new();
        if let Some(id) = &draft.id {
            body.insert("id".to_string(), Value::String(id.clone()));
        }
        for field in self.spec.fields {
            if field.kind == FieldKind::Image {
                continue;
            }
            let value = draft.values.get(field.name).cloned().unwrap_or_default();
            let json_value = match field.kind {
                FieldKind::Number { .. } => value
                    .trim()
                    .parse::<i64>()
                    .map(Value::from)
                    .unwrap_or(Value::String(value)),
                _ => Value::String(value),
            };
            body.insert(field.name.to_string(), json_value);
        }
        req.json(Value::Object(body))
    }
}

fn json_scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
