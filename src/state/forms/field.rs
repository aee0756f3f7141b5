//! Form field value objects

/// Represents a single text input with its configuration and value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new empty text field
    pub fn text(label: &str, is_multiline: bool) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            is_multiline,
        }
    }

    /// Get the text value
    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Replace the text value
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_empty() {
        let field = FormField::text("IBAN", false);
        assert!(field.is_empty());
        assert_eq!(field.label, "IBAN");
        assert!(!field.is_multiline);
    }

    #[test]
    fn test_set_text_replaces_value() {
        let mut field = FormField::text("Address", true);
        field.set_text("Main street 1\nAmsterdam");
        assert_eq!(field.as_text(), "Main street 1\nAmsterdam");
        field.set_text("");
        assert!(field.is_empty());
    }
}
