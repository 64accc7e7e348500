//! The three accepted form kinds and the field sets they carry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormKind {
    #[serde(rename = "Contact Form")]
    Contact,
    #[serde(rename = "Application Form")]
    Application,
    #[serde(rename = "Newsletter Subscription")]
    Newsletter,
}

const CONTACT_FIELDS: &[&str] = &["name", "email", "subject", "message"];

const APPLICATION_FIELDS: &[&str] = &[
    "firstname",
    "lastname",
    "program",
    "parent_name",
    "number",
    "email",
    "address",
    "dob",
    "gender",
    "agree",
];

const NEWSLETTER_FIELDS: &[&str] = &["newsletter_email"];

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Contact, FormKind::Application, FormKind::Newsletter];

    /// The `form_type` tag stored with every record.
    pub fn label(self) -> &'static str {
        match self {
            FormKind::Contact => "Contact Form",
            FormKind::Application => "Application Form",
            FormKind::Newsletter => "Newsletter Subscription",
        }
    }

    pub fn fields(self) -> &'static [&'static str] {
        match self {
            FormKind::Contact => CONTACT_FIELDS,
            FormKind::Application => APPLICATION_FIELDS,
            FormKind::Newsletter => NEWSLETTER_FIELDS,
        }
    }

    /// Field holding the submitter's own address.
    pub fn recipient_field(self) -> &'static str {
        match self {
            FormKind::Contact | FormKind::Application => "email",
            FormKind::Newsletter => "newsletter_email",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            FormKind::Contact => "Contact form submitted and email sent successfully!",
            FormKind::Application => "Application form submitted and email sent successfully!",
            FormKind::Newsletter => "Newsletter subscription successful and confirmation email sent!",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            FormKind::Contact => "Error submitting contact form or sending email.",
            FormKind::Application => "Error submitting application form or sending email.",
            FormKind::Newsletter => "Error subscribing to newsletter or sending email.",
        }
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The field set of one submission, restricted to the fields its kind defines.
/// Values are kept exactly as the transport decoded them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(Map<String, Value>);

impl FormData {
    /// Pick the kind's fields out of a decoded request body. Unknown keys are dropped.
    pub fn extract(kind: FormKind, raw: &Value) -> Self {
        let mut data = Map::new();
        if let Some(obj) = raw.as_object() {
            for name in kind.fields() {
                if let Some(value) = obj.get(*name) {
                    data.insert((*name).to_string(), value.clone());
                }
            }
        }
        FormData(data)
    }

    /// First field of `kind` that is absent or null, if any.
    pub fn missing_field(&self, kind: FormKind) -> Option<&'static str> {
        kind.fields()
            .iter()
            .copied()
            .find(|name| matches!(self.0.get(*name), None | Some(Value::Null)))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Display form of a field: strings verbatim, other scalars as JSON, absent as empty.
    pub fn text(&self, name: &str) -> String {
        match self.0.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Checkbox-style reading of a field.
    pub fn flag(&self, name: &str) -> bool {
        match self.0.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "yes" | "1"
            ),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// A submission that has passed intake but is not yet stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSubmission {
    #[serde(rename = "formType")]
    pub form_kind: FormKind,
    #[serde(rename = "formData")]
    pub form_data: FormData,
}

impl NewSubmission {
    pub fn new(form_kind: FormKind, raw: &Value) -> Self {
        Self {
            form_kind,
            form_data: FormData::extract(form_kind, raw),
        }
    }

    pub fn recipient(&self) -> String {
        self.form_data.text(self.form_kind.recipient_field())
    }
}
