//! Per-form validation rules

use crate::core::error::{FieldValidationError, ValidationError};
use indexmap::IndexMap;
use serde_json::{Map, Value};

type Validator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type Filter = Box<dyn Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync>;

#[derive(Default)]
struct FieldRules {
    filters: Vec<Filter>,
    validators: Vec<Validator>,
}

/// Filters and validators for the fields of one form
///
/// Fields are processed in the order they were first registered, which is
/// also the order errors are reported in. For each field, every filter runs
/// first, then validators run until the first one fails: a field shows a
/// single message at a time.
pub struct FormRules {
    form_name: String,
    fields: IndexMap<String, FieldRules>,
}

impl FormRules {
    pub fn new(form_name: impl Into<String>) -> Self {
        Self {
            form_name: form_name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn form_name(&self) -> &str {
        &self.form_name
    }

    /// Add a filter for a field
    pub fn add_filter<F>(&mut self, field: &str, filter: F)
    where
        F: Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.fields
            .entry(field.to_string())
            .or_default()
            .filters
            .push(Box::new(filter));
    }

    /// Add a validator for a field
    pub fn add_validator<V>(&mut self, field: &str, validator: V)
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.fields
            .entry(field.to_string())
            .or_default()
            .validators
            .push(Box::new(validator));
    }

    /// Filter then validate a JSON object
    ///
    /// Missing fields are treated as null. Fields without rules are copied
    /// through untouched. On success the filtered object is returned.
    pub fn validate_and_filter(&self, payload: Value) -> Result<Value, ValidationError> {
        let mut object = match payload {
            Value::Object(map) => map,
            other => {
                return Err(ValidationError::FieldErrors(vec![FieldValidationError {
                    field: self.form_name.clone(),
                    message: format!("Expected an object, got {}", other),
                }]));
            }
        };

        let mut errors = Vec::new();
        for (field, rules) in &self.fields {
            let mut value = object.remove(field).unwrap_or(Value::Null);

            let mut filtered = true;
            for filter in &rules.filters {
                match filter(field, value) {
                    Ok(v) => value = v,
                    Err(e) => {
                        errors.push(FieldValidationError {
                            field: field.clone(),
                            message: e.to_string(),
                        });
                        filtered = false;
                        value = Value::Null;
                        break;
                    }
                }
            }

            if filtered {
                let failure = rules.validators.iter().find_map(|v| v(field, &value).err());
                if let Some(message) = failure {
                    errors.push(FieldValidationError {
                        field: field.clone(),
                        message,
                    });
                }
            }

            object.insert(field.clone(), value);
        }

        if errors.is_empty() {
            Ok(Value::Object(object))
        } else {
            tracing::debug!(form = %self.form_name, errors = errors.len(), "form rejected");
            Err(ValidationError::FieldErrors(errors))
        }
    }
}

/// Remove a key from a filtered object when its value is null
pub(crate) fn drop_null(object: &mut Map<String, Value>, field: &str) {
    if object.get(field).is_some_and(Value::is_null) {
        object.remove(field);
    }
}
