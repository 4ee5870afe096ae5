use thiserror::Error;

use crate::form::FormField;

#[derive(Error, Debug)]
pub enum CaptionError {
    #[error("please fill all fields (missing: {})", list_fields(.missing))]
    Validation { missing: Vec<FormField> },
    #[error("unknown {field}: {value:?}")]
    UnknownChoice { field: FormField, value: String },
    #[error("generation failed: {0:#}")]
    Generation(anyhow::Error),
    #[error("config error: {0}")]
    Config(String),
}

fn list_fields(fields: &[FormField]) -> String {
    fields.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(", ")
}
