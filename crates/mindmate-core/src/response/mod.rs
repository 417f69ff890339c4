//! Reply selection and support resources.

mod resources;
mod selector;
mod templates;

pub use resources::{
    full_catalog, resources_for, ResourceCategory, ResourceMap, CRISIS_RESOURCES_BLOCK,
};
pub use selector::{ResponseOrigin, ResponseRecord, ResponseSelector};
pub use templates::{select_template, templates_for, TemplateStrategy};
