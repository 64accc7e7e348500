use std::path::Path;

use crate::error::ConfigError;
use crate::forms::{FormData, FormKind};

/// Fixed header and footer wrapped around every outgoing body.
#[derive(Debug, Clone)]
pub struct EmailLayout {
    header: String,
    footer: String,
}

impl EmailLayout {
    pub fn new(header: impl Into<String>, footer: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            footer: footer.into(),
        }
    }

    /// Read `header.html` and `footer.html` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| ConfigError::Template { path, source })
        };

        Ok(Self {
            header: read("header.html")?,
            footer: read("footer.html")?,
        })
    }

    pub fn wrap(&self, body: &str) -> String {
        let mut html = String::with_capacity(self.header.len() + body.len() + self.footer.len());
        html.push_str(&self.header);
        html.push_str(body);
        html.push_str(&self.footer);
        html
    }
}

/// A rendered subject and body fragment, before layout wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub subject: String,
    pub body: String,
}

pub fn submitter_notice(kind: FormKind, data: &FormData) -> Notice {
    match kind {
        FormKind::Contact => render_contact_confirmation(data),
        FormKind::Application => render_application_confirmation(data),
        FormKind::Newsletter => render_newsletter_confirmation(data),
    }
}

pub fn admin_notice(kind: FormKind, data: &FormData) -> Notice {
    match kind {
        FormKind::Contact => render_contact_admin(data),
        FormKind::Application => render_application_admin(data),
        FormKind::Newsletter => render_newsletter_admin(data),
    }
}

/// Field values go into bodies exactly as submitted.
fn field(data: &FormData, name: &str) -> String {
    data.text(name)
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn render_contact_confirmation(data: &FormData) -> Notice {
    let name = field(data, "name");
    let email = field(data, "email");
    let subject = field(data, "subject");
    let message = field(data, "message");

    Notice {
        subject: format!("Contact Form Submission: {}", data.text("subject")),
        body: format!(
            r#"
<p>Dear {name},</p>
<p>Thank you for contacting us. We have received your message and will get back to you shortly.</p>
<p><strong>Email:</strong> {email}</p>
<p><strong>Subject:</strong> {subject}</p>
<p><strong>Message:</strong> {message}</p>
"#
        ),
    }
}

fn render_contact_admin(data: &FormData) -> Notice {
    let name = field(data, "name");
    let email = field(data, "email");
    let subject = field(data, "subject");
    let message = field(data, "message");

    Notice {
        subject: format!("ADMIN: New Contact Form Submission - {}", data.text("subject")),
        body: format!(
            r#"
<p>New Contact Form Submission:</p>
<ul>
    <li><strong>Name:</strong> {name}</li>
    <li><strong>Email:</strong> {email}</li>
    <li><strong>Subject:</strong> {subject}</li>
    <li><strong>Message:</strong> {message}</li>
</ul>
"#
        ),
    }
}

struct Application {
    firstname: String,
    lastname: String,
    program: String,
    parent_name: String,
    number: String,
    email: String,
    address: String,
    dob: String,
    gender: String,
    agree: &'static str,
}

impl Application {
    fn from_data(data: &FormData) -> Self {
        Self {
            firstname: field(data, "firstname"),
            lastname: field(data, "lastname"),
            program: field(data, "program"),
            parent_name: field(data, "parent_name"),
            number: field(data, "number"),
            email: field(data, "email"),
            address: field(data, "address"),
            dob: field(data, "dob"),
            gender: field(data, "gender"),
            agree: yes_no(data.flag("agree")),
        }
    }
}

fn render_application_confirmation(data: &FormData) -> Notice {
    let a = Application::from_data(data);

    Notice {
        subject: format!(
            "Application Form Submission for {} {}",
            data.text("firstname"),
            data.text("lastname")
        ),
        body: format!(
            r#"
<p>Dear {parent_name},</p>
<p>Thank you for submitting the application for {firstname} {lastname}. We have received your application and will review it soon.</p>
<p><strong>Program:</strong> {program}</p>
<p><strong>Child's Name:</strong> {firstname} {lastname}</p>
<p><strong>Parent's Contact:</strong> {number}</p>
<p><strong>Parent's Email:</strong> {email}</p>
<p><strong>Address:</strong> {address}</p>
<p><strong>Date of Birth:</strong> {dob}</p>
<p><strong>Gender:</strong> {gender}</p>
<p><strong>Agreed to Terms:</strong> {agree}</p>
"#,
            parent_name = a.parent_name,
            firstname = a.firstname,
            lastname = a.lastname,
            program = a.program,
            number = a.number,
            email = a.email,
            address = a.address,
            dob = a.dob,
            gender = a.gender,
            agree = a.agree,
        ),
    }
}

fn render_application_admin(data: &FormData) -> Notice {
    let a = Application::from_data(data);

    Notice {
        subject: format!(
            "ADMIN: New Application Form Submission for {} {}",
            data.text("firstname"),
            data.text("lastname")
        ),
        body: format!(
            r#"
<p>New Application Form Submission:</p>
<ul>
    <li><strong>Child's Name:</strong> {firstname} {lastname}</li>
    <li><strong>Program:</strong> {program}</li>
    <li><strong>Parent's Name:</strong> {parent_name}</li>
    <li><strong>Parent's Contact:</strong> {number}</li>
    <li><strong>Parent's Email:</strong> {email}</li>
    <li><strong>Address:</strong> {address}</li>
    <li><strong>Date of Birth:</strong> {dob}</li>
    <li><strong>Gender:</strong> {gender}</li>
    <li><strong>Agreed to Terms:</strong> {agree}</li>
</ul>
"#,
            firstname = a.firstname,
            lastname = a.lastname,
            program = a.program,
            parent_name = a.parent_name,
            number = a.number,
            email = a.email,
            address = a.address,
            dob = a.dob,
            gender = a.gender,
            agree = a.agree,
        ),
    }
}

fn render_newsletter_confirmation(data: &FormData) -> Notice {
    let email = field(data, "newsletter_email");

    Notice {
        subject: "Newsletter Subscription Confirmation".to_string(),
        body: format!(
            r#"
<p>Dear Subscriber,</p>
<p>Thank you for subscribing to our newsletter! You will now receive updates from us.</p>
<p><strong>Email:</strong> {email}</p>
"#
        ),
    }
}

fn render_newsletter_admin(data: &FormData) -> Notice {
    let email = field(data, "newsletter_email");

    Notice {
        subject: format!(
            "ADMIN: New Newsletter Subscription - {}",
            data.text("newsletter_email")
        ),
        body: format!(
            r#"
<p>New Newsletter Subscription:</p>
<ul>
    <li><strong>Email:</strong> {email}</li>
</ul>
"#
        ),
    }
}
