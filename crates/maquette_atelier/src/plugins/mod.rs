//! The stock plugin set.

mod components;
mod css;
mod entry;
mod jsx;
mod manifest;
mod router;

pub use components::ComponentsPlugin;
pub use css::CssModulesPlugin;
pub use entry::EntryPlugin;
pub use jsx::JsxPlugin;
pub use manifest::ManifestPlugin;
pub use router::RouterPlugin;

/// `about-us` → `AboutUs`.
pub(crate) fn pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Component name of a page file stem: `index` → `IndexPage`.
pub(crate) fn page_component_name(file_name: &str) -> String {
    format!("{}Page", pascal_case(file_name))
}
