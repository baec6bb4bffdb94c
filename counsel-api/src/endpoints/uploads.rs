use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

pub const AVATAR_PATH: &str = "/uploads/avatar";
pub const DOCUMENT_PATH: &str = "/uploads/documents";

const DEFAULT_FIELD: &str = "file";

/// A file to send as a multipart form, plus any extra text fields.
#[derive(Debug, Clone)]
pub struct UploadFile {
    field: String,
    file_name: String,
    bytes: Vec<u8>,
    mime_type: Option<String>,
    fields: Vec<(String, String)>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            field: DEFAULT_FIELD.to_string(),
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime_type: None,
            fields: Vec::new(),
        }
    }

    /// Form field the file is sent under. Defaults to `file`.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn into_form(self) -> Result<Form, reqwest::Error> {
        let mut part = Part::bytes(self.bytes).file_name(self.file_name);
        if let Some(mime_type) = self.mime_type {
            part = part.mime_str(&mime_type)?;
        }

        let form = self
            .fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));
        Ok(form.part(self.field, part))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub url: String,
    pub file_name: Option<String>,
    pub size: Option<u64>,
}
