//! Declarative form validation.
//!
//! A `FormValidator` is configured once with a rule set keyed by field name
//! and then run against loosely-typed form data. Each run clears every
//! prior error, evaluates a field's rules in order, and records only the
//! first failing rule's message. There are no cross-field or asynchronous
//! rules.

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

/// Predicate over the raw form value for custom rules.
pub type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// One validation rule for a field. A rule may combine several checks;
/// they are evaluated in a fixed order (required, max, min, pattern,
/// custom) and the rule fails on the first check that does not hold.
pub struct ValidationRule {
    pub required: bool,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub pattern: Option<Regex>,
    pub validator: Option<Predicate>,
    pub message: String,
}

impl ValidationRule {
    fn base(message: impl Into<String>) -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            pattern: None,
            validator: None,
            message: message.into(),
        }
    }

    /// Rule that fails on an empty or whitespace-only value.
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::base(message)
        }
    }

    /// Rule that fails when the stringified value is shorter than `min`.
    pub fn min(min: usize, message: impl Into<String>) -> Self {
        Self {
            min: Some(min),
            ..Self::base(message)
        }
    }

    /// Rule that fails when the stringified value is longer than `max`.
    pub fn max(max: usize, message: impl Into<String>) -> Self {
        Self {
            max: Some(max),
            ..Self::base(message)
        }
    }

    /// Rule that fails when the stringified value does not match `pattern`.
    pub fn pattern(pattern: Regex, message: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern),
            ..Self::base(message)
        }
    }

    /// Rule backed by an arbitrary predicate over the raw value.
    pub fn custom<F>(validator: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            validator: Some(Box::new(validator)),
            ..Self::base(message)
        }
    }

    /// Returns true when the value satisfies every check of this rule.
    fn passes(&self, value: &Value) -> bool {
        let text = stringify(value);

        if self.required && text.trim().is_empty() {
            return false;
        }
        if let Some(max) = self.max
            && text.chars().count() > max
        {
            return false;
        }
        if let Some(min) = self.min
            && text.chars().count() < min
        {
            return false;
        }
        if let Some(pattern) = &self.pattern
            && !pattern.is_match(&text)
        {
            return false;
        }
        if let Some(validator) = &self.validator
            && !validator(value)
        {
            return false;
        }
        true
    }
}

/// Stringifies a form value the way the UI layer would render it: strings
/// verbatim, null/absent as empty, everything else via JSON rendering.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Stateless rule evaluator driving inline field-error display.
pub struct FormValidator {
    rules: BTreeMap<String, Vec<ValidationRule>>,
    errors: BTreeMap<String, String>,
}

impl FormValidator {
    /// Builds a validator from a rule set. Every configured field starts
    /// with an empty error message.
    pub fn new(rules: BTreeMap<String, Vec<ValidationRule>>) -> Self {
        let errors = rules.keys().map(|k| (k.clone(), String::new())).collect();
        Self { rules, errors }
    }

    /// Validates `form`, returning overall validity.
    ///
    /// All prior errors are cleared first, so no stale message survives a
    /// field becoming valid. Per field, rules run in order and only the
    /// first failing rule's message is recorded.
    pub fn validate(&mut self, form: &BTreeMap<String, Value>) -> bool {
        for message in self.errors.values_mut() {
            message.clear();
        }

        let mut is_valid = true;
        for (field, rules) in &self.rules {
            let value = form.get(field).cloned().unwrap_or(Value::Null);
            for rule in rules {
                if !rule.passes(&value) {
                    self.errors.insert(field.clone(), rule.message.clone());
                    is_valid = false;
                    break;
                }
            }
        }
        is_valid
    }

    /// The recorded error for `field`, empty when the field is valid.
    pub fn error(&self, field: &str) -> &str {
        self.errors.get(field).map(String::as_str).unwrap_or("")
    }

    /// All field errors, including empty entries for valid fields.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }
}
