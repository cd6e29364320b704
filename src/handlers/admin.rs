// src/handlers/admin.rs
//
// Back-office routes. Every screen goes through the generic
// ResourceController; the only per-resource knowledge here is the spec
// table lookup and the address cascade for resources that carry one.
use crate::admin::controller::{FormDraft, ResourceController, SubmitOutcome, ValidationErrorMap};
use crate::admin::resources::{resource_by_key, ResourceSpec, RESOURCES};
use crate::api::ApiError;
use crate::app::App;
use crate::auth::portal::{self, Portal};
use crate::domain::address::AddressSelector;
use crate::domain::validate::FieldKind;
use crate::errors::{ResultResp, ServerError};
use crate::forms::{parse_query, parse_submission, validate_upload, ParsedForm};
use crate::handlers::{flash_from, keyword_from, page_from, with_flash};
use crate::responses::{html_response, redirect};
use crate::spreadsheets::export_resource_xlsx;
use crate::templates::pages::admin_delete::{admin_delete_page, DeleteVm};
use crate::templates::pages::admin_form::{admin_form_page, FormVm};
use crate::templates::pages::admin_list::{admin_list_page, ListVm};
use astra::Request;
use serde_json::Value;

const ADMIN_PAGE_SIZE: u32 = 10;

/// Route gate: no employee token, no back office.
fn require_employee(req: &Request) -> Result<String, ResultResp> {
    match portal::portal_token(req, Portal::Employee) {
        Some(token) => Ok(token),
        None => Err(redirect(Portal::Employee.login_route())),
    }
}

fn spec_or_404(key: &str) -> Result<&'static ResourceSpec, ServerError> {
    resource_by_key(key).ok_or(ServerError::NotFound)
}

fn has_address_field(spec: &ResourceSpec) -> bool {
    spec.fields.iter().any(|f| f.kind == FieldKind::Address)
}

pub fn dashboard(req: &Request) -> ResultResp {
    if let Err(resp) = require_employee(req) {
        return resp;
    }
    redirect(&format!("/admin/{}", RESOURCES[0].key))
}

pub fn list(req: &Request, app: &App, key: &str) -> ResultResp {
    let token = match require_employee(req) {
        Ok(token) => token,
        Err(resp) => return resp,
    };
    let spec = spec_or_404(key)?;
    let ctl = ResourceController::new(&app.api, spec, Some(token));

    let query = parse_query(req);
    let page = page_from(&query);
    let keyword = keyword_from(&query);

    let (rows, total_pages, flash) = match ctl.list(page, ADMIN_PAGE_SIZE, Some(&keyword)) {
        Ok(paged) => (paged.items, paged.total_pages, flash_from(req)),
        Err(ApiError::Status { status: 401, .. }) => {
            return redirect(Portal::Employee.login_route())
        }
        Err(err) => {
            // Keep the screen alive on transport failure; just show the
            // notice banner over an empty table.
            eprintln!("{} list fetch failed: {err}", spec.name);
            (
                Vec::new(),
                0,
                Some("Could not load the list. Please try again.".to_string()),
            )
        }
    };

    html_response(admin_list_page(&ListVm {
        spec,
        rows,
        current_page: page,
        total_pages,
        keyword,
        flash,
    }))
}

pub fn new_form(req: &Request, app: &App, key: &str) -> ResultResp {
    let token = match require_employee(req) {
        Ok(token) => token,
        Err(resp) => return resp,
    };
    let spec = spec_or_404(key)?;
    let ctl = ResourceController::new(&app.api, spec, Some(token));
    let draft = ctl.open_create();

    render_form(app, spec, &draft, &ValidationErrorMap::new(), flash_from(req))
}

pub fn edit_form(req: &Request, app: &App, key: &str, id: &str) -> ResultResp {
    let token = match require_employee(req) {
        Ok(token) => token,
        Err(resp) => return resp,
    };
    let spec = spec_or_404(key)?;
    let ctl = ResourceController::new(&app.api, spec, Some(token));

    let entity = match ctl.fetch_one(id) {
        Ok(entity) => entity,
        Err(ApiError::Status { status: 404, .. }) => return Err(ServerError::NotFound),
        Err(err) => return Err(err.into()),
    };
    let draft = ctl.open_edit(&entity);

    render_form(app, spec, &draft, &ValidationErrorMap::new(), flash_from(req))
}

fn render_form(
    app: &App,
    spec: &'static ResourceSpec,
    draft: &FormDraft,
    errors: &ValidationErrorMap,
    flash: Option<String>,
) -> ResultResp {
    if has_address_field(spec) {
        let seed = draft.values.get("address").cloned().unwrap_or_default();
        let selector = AddressSelector::from_seed(&app.regions, &seed);
        html_response(admin_form_page(&FormVm {
            spec,
            draft,
            errors,
            selector: Some(&selector),
            flash,
        }))
    } else {
        html_response(admin_form_page(&FormVm {
            spec,
            draft,
            errors,
            selector: None,
            flash,
        }))
    }
}

/// Rebuild the draft from a submission. Address fields come in as the
/// three cascade levels; the draft stores the derived display string.
fn draft_from_form(
    ctl: &ResourceController,
    spec: &ResourceSpec,
    form: &ParsedForm,
    selector: &AddressSelector,
) -> (FormDraft, ValidationErrorMap) {
    let mut draft = ctl.open_create();
    let mut errors = ValidationErrorMap::new();

    let id = form.get("id").trim().to_string();
    if !id.is_empty() {
        draft.id = Some(id);
    }

    for field in spec.fields {
        match field.kind {
            FieldKind::Address => {
                draft
                    .values
                    .insert(field.name.to_string(), selector.address().to_string());
            }
            FieldKind::Image => {}
            _ => {
                ctl.field_change(&mut draft, &mut errors, field.name, form.get(field.name));
                // A write-only field left blank on edit keeps the stored
                // value; it is only required when creating.
                if field.write_only
                    && draft.id.is_some()
                    && form.get(field.name).trim().is_empty()
                {
                    errors.remove(field.name);
                }
            }
        }
    }

    if let Some(file) = &form.file {
        match validate_upload(file) {
            Ok(()) => draft.upload = Some(file.clone()),
            Err(message) => {
                errors.insert(file.field.clone(), message);
            }
        }
    }

    (draft, errors)
}

pub fn save(req: &mut Request, app: &App, key: &str) -> ResultResp {
    let token = match require_employee(req) {
        Ok(token) => token,
        Err(resp) => return resp,
    };
    let spec = spec_or_404(key)?;
    let ctl = ResourceController::new(&app.api, spec, Some(token));

    let form = parse_submission(req)?;

    let mut selector = AddressSelector::new(&app.regions);
    if has_address_field(spec) {
        selector.select_city(form.get("city"));
        selector.select_district(form.get("district"));
        selector.select_ward(form.get("ward"));
    }

    let (draft, mut errors) = draft_from_form(&ctl, spec, &form, &selector);

    let selector_for = if has_address_field(spec) {
        Some(&selector)
    } else {
        None
    };
    let render = |draft: &FormDraft, errors: &ValidationErrorMap, flash: Option<String>| {
        html_response(admin_form_page(&FormVm {
            spec,
            draft,
            errors,
            selector: selector_for,
            flash,
        }))
    };

    // Cascade reload: rebuild the option lists, don't save yet.
    if form.get("save").is_empty() && has_address_field(spec) {
        return render(&draft, &errors, None);
    }

    // Replace the flat "Address must not be empty" with one error per
    // missing cascade level.
    if has_address_field(spec) {
        for (field, message) in selector.submit_errors() {
            errors.insert(field.to_string(), message);
        }
    }

    let mut all_errors = ctl.validate(&draft);
    if has_address_field(spec) {
        all_errors.remove("address");
    }
    all_errors.extend(errors);
    if !all_errors.is_empty() {
        return render(&draft, &all_errors, None);
    }

    match ctl.submit(&draft) {
        Ok(SubmitOutcome::Saved) => redirect(&with_flash(
            &format!("/admin/{}", spec.key),
            &format!("{} saved.", spec.name),
        )),
        Ok(SubmitOutcome::Invalid(field_errors)) => render(&draft, &field_errors, None),
        Err(err) => {
            eprintln!("{} save failed: {err}", spec.name);
            render(
                &draft,
                &ValidationErrorMap::new(),
                Some("Could not save. Please try again.".to_string()),
            )
        }
    }
}

pub fn delete_confirm(req: &Request, app: &App, key: &str, id: &str) -> ResultResp {
    let token = match require_employee(req) {
        Ok(token) => token,
        Err(resp) => return resp,
    };
    let spec = spec_or_404(key)?;
    let ctl = ResourceController::new(&app.api, spec, Some(token));

    let entity = match ctl.fetch_one(id) {
        Ok(entity) => entity,
        Err(ApiError::Status { status: 404, .. }) => return Err(ServerError::NotFound),
        Err(err) => return Err(err.into()),
    };
    let display_name = entity
        .get("name")
        .or_else(|| entity.get("fullName"))
        .and_then(Value::as_str)
        .unwrap_or(id)
        .to_string();

    html_response(admin_delete_page(&DeleteVm {
        spec,
        id: id.to_string(),
        display_name,
    }))
}

pub fn delete(req: &Request, app: &App, key: &str, id: &str) -> ResultResp {
    let token = match require_employee(req) {
        Ok(token) => token,
        Err(resp) => return resp,
    };
    let spec = spec_or_404(key)?;
    let ctl = ResourceController::new(&app.api, spec, Some(token));

    let list_route = format!("/admin/{}", spec.key);
    match ctl.delete(id) {
        Ok(()) => redirect(&with_flash(&list_route, &format!("{} deleted.", spec.name))),
        Err(err) => {
            eprintln!("{} delete failed: {err}", spec.name);
            redirect(&with_flash(&list_route, "Could not delete. Please try again."))
        }
    }
}

pub fn export(req: &Request, app: &App, key: &str) -> ResultResp {
    let token = match require_employee(req) {
        Ok(token) => token,
        Err(resp) => return resp,
    };
    let spec = spec_or_404(key)?;
    let ctl = ResourceController::new(&app.api, spec, Some(token));

    let rows = ctl.fetch_all()?;
    export_resource_xlsx(spec, &rows)
}
