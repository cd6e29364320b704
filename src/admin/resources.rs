// src/admin/resources.rs
//
// One configuration table per admin screen. Every back-office list page
// (Brand, Color, Size, ...) is the same paged CRUD contract, so the
// differences live here as data instead of ten near-identical screens.
use crate::domain::validate::FieldKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Status-flip via `PUT /Resource/SoftDelete/{id}`.
    Soft,
    /// Row removal via `DELETE /Resource/{id}`.
    Hard,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Form and JSON key, matching the backend's camelCase naming.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Left blank when editing (password); never copied into a draft.
    pub write_only: bool,
    /// Substring to look for in 409 violation tokens.
    pub conflict_token: Option<&'static str>,
    /// Shown as a list column and exported to the spreadsheet.
    pub in_table: bool,
}

const fn text(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Text,
        required: true,
        write_only: false,
        conflict_token: None,
        in_table: true,
    }
}

const fn person_name(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        kind: FieldKind::PersonName,
        ..text(name, label)
    }
}

const fn phone(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        kind: FieldKind::Phone,
        conflict_token: Some("PhoneNumber"),
        ..text(name, label)
    }
}

const fn email(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        kind: FieldKind::Email,
        conflict_token: Some("Email"),
        ..text(name, label)
    }
}

const fn address(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        kind: FieldKind::Address,
        ..text(name, label)
    }
}

const fn number(
    name: &'static str,
    label: &'static str,
    min: i64,
    max: i64,
) -> FieldSpec {
    FieldSpec {
        kind: FieldKind::Number { min, max },
        ..text(name, label)
    }
}

const fn image(name: &'static str, label: &'static str, required: bool) -> FieldSpec {
    FieldSpec {
        kind: FieldKind::Image,
        required,
        in_table: false,
        ..text(name, label)
    }
}

const fn password(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        kind: FieldKind::Password,
        write_only: true,
        in_table: false,
        ..text(name, label)
    }
}

const fn user_name(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        conflict_token: Some("DuplicateUserName"),
        ..text(name, label)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResourceSpec {
    /// URL slug under /admin/, e.g. "brands".
    pub key: &'static str,
    /// Display name, singular.
    pub name: &'static str,
    /// Backend collection path, e.g. "/Brands".
    pub base_path: &'static str,
    pub delete: DeleteMode,
    /// Status the backend answers updates with; differs per resource.
    pub update_status: u16,
    pub fields: &'static [FieldSpec],
}

pub const RESOURCES: &[ResourceSpec] = &[
    ResourceSpec {
        key: "brands",
        name: "Brand",
        base_path: "/Brands",
        delete: DeleteMode::Soft,
        update_status: 204,
        fields: &[text("name", "Name")],
    },
    ResourceSpec {
        key: "colors",
        name: "Color",
        base_path: "/Colors",
        delete: DeleteMode::Soft,
        update_status: 204,
        fields: &[text("name", "Name")],
    },
    ResourceSpec {
        key: "sizes",
        name: "Size",
        base_path: "/Sizes",
        delete: DeleteMode::Soft,
        update_status: 204,
        fields: &[text("name", "Name")],
    },
    ResourceSpec {
        key: "product-types",
        name: "Product Type",
        base_path: "/ProductTypes",
        delete: DeleteMode::Soft,
        update_status: 204,
        fields: &[text("name", "Name")],
    },
    ResourceSpec {
        key: "suppliers",
        name: "Supplier",
        base_path: "/Suppliers",
        delete: DeleteMode::Soft,
        update_status: 204,
        fields: &[
            text("name", "Name"),
            phone("phoneNumber", "Phone Number"),
            email("email", "Email"),
            address("address", "Address"),
        ],
    },
    ResourceSpec {
        key: "employees",
        name: "Employee",
        base_path: "/Employees",
        delete: DeleteMode::Soft,
        update_status: 204,
        fields: &[
            person_name("fullName", "Full Name"),
            user_name("userName", "User Name"),
            password("password", "Password"),
            phone("phoneNumber", "Phone Number"),
            email("email", "Email"),
            address("address", "Address"),
            image("avatar", "Avatar", false),
        ],
    },
    ResourceSpec {
        key: "customers",
        name: "Customer",
        base_path: "/Customers",
        delete: DeleteMode::Soft,
        update_status: 204,
        fields: &[
            person_name("fullName", "Full Name"),
            user_name("userName", "User Name"),
            phone("phoneNumber", "Phone Number"),
            email("email", "Email"),
            address("address", "Address"),
            image("avatar", "Avatar", false),
        ],
    },
    ResourceSpec {
        key: "models",
        name: "Model",
        base_path: "/Models",
        delete: DeleteMode::Soft,
        update_status: 200,
        fields: &[
            text("name", "Name"),
            FieldSpec {
                required: false,
                ..text("description", "Description")
            },
            image("image", "Image", false),
        ],
    },
    ResourceSpec {
        key: "products",
        name: "Product",
        base_path: "/Products",
        delete: DeleteMode::Hard,
        update_status: 200,
        fields: &[
            text("name", "Name"),
            number("price", "Price", 1_000, 100_000_000),
            number("quantity", "Quantity", 0, 10_000),
            image("image", "Image", false),
        ],
    },
    ResourceSpec {
        key: "sliders",
        name: "Slider",
        base_path: "/Sliders",
        delete: DeleteMode::Hard,
        update_status: 204,
        fields: &[text("name", "Name"), image("image", "Image", true)],
    },
];

pub fn resource_by_key(key: &str) -> Option<&'static ResourceSpec> {
    RESOURCES.iter().find(|spec| spec.key == key)
}
