use crate::decl::placeholder;
use crate::pattern::RoutePattern;
use std::collections::HashMap;

/// Replaces every `{{name}}` in `template` with its value from `values`.
/// Placeholders without a value are left as they are.
pub fn resolve(values: &HashMap<String, String>, template: &str) -> String {
    let mut result = template.to_string();
    for (name, value) in values {
        let token = placeholder(name);
        if result.contains(&token) {
            result = result.replace(&token, value);
        }
    }
    tracing::trace!(template, resolved = %result, "resolved template");
    result
}

impl RoutePattern {
    pub fn resolve(&self, values: &HashMap<String, String>, template: &str) -> String {
        resolve(values, template)
    }
}
