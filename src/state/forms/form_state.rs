//! Form state management for the pass creation form

use super::field::FormField;

/// Trait for common form navigation
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// The five recognized inputs of the pass form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Plan,
    CompanyName,
    Iban,
    Bic,
    Address,
}

impl FieldName {
    /// All fields in display and submission order
    pub const ALL: [FieldName; 5] = [
        FieldName::Plan,
        FieldName::CompanyName,
        FieldName::Iban,
        FieldName::Bic,
        FieldName::Address,
    ];

    /// Multipart part name sent to the pass service
    pub fn key(&self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::CompanyName => "companyName",
            Self::Iban => "iban",
            Self::Bic => "bic",
            Self::Address => "address",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Plan => "Plan",
            Self::CompanyName => "Company Name",
            Self::Iban => "IBAN",
            Self::Bic => "BIC",
            Self::Address => "Address",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Plan => 0,
            Self::CompanyName => 1,
            Self::Iban => 2,
            Self::Bic => 3,
            Self::Address => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Buttons shown below the inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormButton {
    #[default]
    Create,
    Reset,
}

impl FormButton {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Create => Self::Reset,
            Self::Reset => Self::Create,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Reset => "Reset",
        }
    }
}

/// Index of the buttons row, directly after the last input
pub const BUTTONS_ROW: usize = FieldName::ALL.len();

/// Plan and banking details collected from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassForm {
    pub plan: FormField,
    pub company_name: FormField,
    pub iban: FormField,
    pub bic: FormField,
    pub address: FormField,
    pub active_field_index: usize,
    pub selected_button: FormButton,
}

impl PassForm {
    pub fn new() -> Self {
        Self {
            plan: FormField::text(FieldName::Plan.label(), false),
            company_name: FormField::text(FieldName::CompanyName.label(), false),
            iban: FormField::text(FieldName::Iban.label(), false),
            bic: FormField::text(FieldName::Bic.label(), false),
            address: FormField::text(FieldName::Address.label(), true),
            active_field_index: 0,
            selected_button: FormButton::default(),
        }
    }

    pub fn field(&self, name: FieldName) -> &FormField {
        match name {
            FieldName::Plan => &self.plan,
            FieldName::CompanyName => &self.company_name,
            FieldName::Iban => &self.iban,
            FieldName::Bic => &self.bic,
            FieldName::Address => &self.address,
        }
    }

    fn field_mut(&mut self, name: FieldName) -> &mut FormField {
        match name {
            FieldName::Plan => &mut self.plan,
            FieldName::CompanyName => &mut self.company_name,
            FieldName::Iban => &mut self.iban,
            FieldName::Bic => &mut self.bic,
            FieldName::Address => &mut self.address,
        }
    }

    /// Current value of a single field
    pub fn get(&self, name: FieldName) -> &str {
        self.field(name).as_text()
    }

    /// Replace exactly one field, leaving the other four untouched
    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) {
        self.field_mut(name).set_text(value);
    }

    /// All values in submission order
    pub fn fields(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        FieldName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }

    /// Clear every value and return focus to the first input
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The input under focus, or `None` while the buttons row is active
    pub fn active_name(&self) -> Option<FieldName> {
        FieldName::from_index(self.active_field_index)
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == BUTTONS_ROW
    }

    pub fn is_active_field_multiline(&self) -> bool {
        self.active_name()
            .is_some_and(|name| self.field(name).is_multiline)
    }

    pub fn toggle_button(&mut self) {
        self.selected_button = self.selected_button.toggle();
    }
}

impl Default for PassForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for PassForm {
    fn field_count(&self) -> usize {
        BUTTONS_ROW + 1 // five inputs, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(BUTTONS_ROW);
    }
}
