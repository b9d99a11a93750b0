pub mod submit;

use regex::Regex;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Duration;

// ═══════════════════════════════════════════════════════════
// State machine
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// Validation passed and the request is being sent.
    Submit,
    Succeeded,
    Failed,
}

/// How a finished submission returns to `Idle`. The revert itself happens in
/// the browser: a banner with a delay is removed by `site.js`, and the demo
/// success panel links back to a fresh form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertPolicy {
    AfterDelay(Duration),
    OnUserAction,
}

impl RevertPolicy {
    pub const CONTACT: RevertPolicy = RevertPolicy::AfterDelay(Duration::from_secs(3));
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMachine {
    status: FormStatus,
    policy: RevertPolicy,
}

impl FormMachine {
    pub fn new(policy: RevertPolicy) -> Self {
        FormMachine {
            status: FormStatus::Idle,
            policy,
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Apply an event. Events that make no sense in the current state are
    /// ignored and the state is left as it was.
    pub fn on(&mut self, event: FormEvent) -> FormStatus {
        use FormEvent::*;
        use FormStatus::*;

        let next = match (self.status, event) {
            (Idle, Submit) | (Error, Submit) => Some(Submitting),
            (Submitting, Succeeded) => Some(Success),
            (Submitting, Failed) => Some(Error),
            _ => None,
        };

        match next {
            Some(status) => self.status = status,
            None => log::debug!(
                "Ignoring form event {:?} in state {:?}",
                event,
                self.status
            ),
        }
        self.status
    }

    /// Milliseconds until a finished state reverts on its own, if it does.
    pub fn revert_after_ms(&self) -> Option<u128> {
        match (self.status, self.policy) {
            (FormStatus::Success | FormStatus::Error, RevertPolicy::AfterDelay(d)) => {
                Some(d.as_millis())
            }
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════════════════════

/// Field name to message, rendered next to each input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors(BTreeMap::new())
    }

    pub fn insert(&mut self, field: &'static str, message: &str) {
        self.0.insert(field, message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn or_null(value: &str) -> Value {
    if blank(value) {
        Value::Null
    } else {
        Value::String(value.to_string())
    }
}

/// Adds the `recaptcha` error when a site key is configured but no token came back.
pub fn require_captcha(errors: &mut FieldErrors, site_key: Option<&str>, token: Option<&str>) {
    if site_key.is_some() && token.map_or(true, blank) {
        errors.insert("recaptcha", "Please complete the reCAPTCHA");
    }
}

/// Subject value that switches the lead form to a free-text domain.
pub const OTHER_DOMAIN: &str = "Others";

/// "How did you hear about us?" choices on the demo form.
pub const REFERENCE_OPTIONS: &[&str] = &[
    "Google Search",
    "LinkedIn",
    "Facebook",
    "Twitter",
    "Friend/Colleague",
    "Advertisement",
    "Other",
];

/// A form that can be validated and posted to a CMS collection.
pub trait Submission: Clone + Default + Send + Sync {
    /// CMS collection the payload is posted to.
    const COLLECTION: &'static str;
    const POLICY: RevertPolicy;

    fn validate(&self) -> FieldErrors;
    fn payload(&self) -> Value;
    fn captcha_token(&self) -> Option<&str>;
}

// ═══════════════════════════════════════════════════════════
// Contact / lead form
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, FromForm)]
pub struct LeadForm {
    #[field(default = String::new())]
    pub name: String,
    #[field(default = String::new())]
    pub phone: String,
    #[field(default = String::new())]
    pub email: String,
    #[field(name = "domainOfInterest", default = String::new())]
    pub domain_of_interest: String,
    #[field(name = "otherDomain", default = String::new())]
    pub other_domain: String,
    #[field(default = String::new())]
    pub reason: String,
    #[field(default = String::new())]
    pub reference: String,
    #[field(name = "g-recaptcha-response")]
    pub recaptcha_token: Option<String>,
}

impl Submission for LeadForm {
    const COLLECTION: &'static str = "/leads";
    const POLICY: RevertPolicy = RevertPolicy::CONTACT;

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if blank(&self.name) {
            errors.insert("name", "Name is required");
        }
        if blank(&self.phone) && blank(&self.email) {
            errors.insert("contact", "Please provide either phone or email");
        }
        if !self.email.is_empty() && !is_valid_email(&self.email) {
            errors.insert("email", "Please enter a valid email");
        }
        if blank(&self.reason) {
            errors.insert("reason", "Please tell us why you're contacting us");
        }
        if self.domain_of_interest == OTHER_DOMAIN && blank(&self.other_domain) {
            errors.insert("otherDomain", "Please specify the domain");
        }
        errors
    }

    fn payload(&self) -> Value {
        let (domain, other) = if self.domain_of_interest == OTHER_DOMAIN {
            (&self.other_domain, Value::String(self.other_domain.clone()))
        } else {
            (&self.domain_of_interest, Value::Null)
        };
        json!({
            "name": self.name,
            "phone": or_null(&self.phone),
            "email": or_null(&self.email),
            "domainOfInterest": domain,
            "otherDomain": other,
            "reason": self.reason,
            "reference": or_null(&self.reference),
            "status": "new",
        })
    }

    fn captcha_token(&self) -> Option<&str> {
        self.recaptcha_token.as_deref()
    }
}

// ═══════════════════════════════════════════════════════════
// Demo booking form
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, FromForm)]
pub struct DemoBookingForm {
    #[field(name = "firstName", default = String::new())]
    pub first_name: String,
    #[field(name = "lastName", default = String::new())]
    pub last_name: String,
    #[field(default = String::new())]
    pub email: String,
    #[field(default = String::new())]
    pub company: String,
    #[field(default = String::new())]
    pub product: String,
    #[field(default = String::new())]
    pub phone: String,
    #[field(name = "preferredDate", default = String::new())]
    pub preferred_date: String,
    #[field(default = String::new())]
    pub notes: String,
    #[field(default = String::new())]
    pub reference: String,
    #[field(name = "referenceOther", default = String::new())]
    pub reference_other: String,
    #[field(name = "g-recaptcha-response")]
    pub recaptcha_token: Option<String>,
}

impl DemoBookingForm {
    fn reference_value(&self) -> &str {
        if self.reference == "Other" && !blank(&self.reference_other) {
            &self.reference_other
        } else {
            &self.reference
        }
    }
}

impl Submission for DemoBookingForm {
    const COLLECTION: &'static str = "/demo-bookings";
    const POLICY: RevertPolicy = RevertPolicy::OnUserAction;

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if blank(&self.first_name) {
            errors.insert("firstName", "First name is required");
        }
        if blank(&self.last_name) {
            errors.insert("lastName", "Last name is required");
        }
        if blank(&self.email) {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Please enter a valid email");
        }
        if blank(&self.company) {
            errors.insert("company", "Company is required");
        }
        if blank(&self.product) {
            errors.insert("product", "Please select a product");
        }
        if !blank(&self.preferred_date)
            && chrono::NaiveDate::parse_from_str(self.preferred_date.trim(), "%Y-%m-%d").is_err()
        {
            errors.insert("preferredDate", "Please pick a valid date");
        }
        if self.reference == "Other" && blank(&self.reference_other) {
            errors.insert("referenceOther", "Please tell us where you heard about us");
        }
        errors
    }

    fn payload(&self) -> Value {
        json!({
            "firstName": self.first_name,
            "lastName": self.last_name,
            "email": self.email,
            "company": self.company,
            "product": self.product,
            "phone": self.phone,
            "preferredDate": or_null(&self.preferred_date),
            "notes": self.notes,
            "reference": self.reference_value(),
            "status": "new",
        })
    }

    fn captcha_token(&self) -> Option<&str> {
        self.recaptcha_token.as_deref()
    }
}

// ═══════════════════════════════════════════════════════════
// Service request form
// ═══════════════════════════════════════════════════════════

/// Service requests are stored as leads, with the service as the domain of
/// interest and the company folded into the message.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromForm)]
pub struct ServiceRequestForm {
    #[field(default = String::new())]
    pub name: String,
    #[field(default = String::new())]
    pub email: String,
    #[field(default = String::new())]
    pub phone: String,
    #[field(default = String::new())]
    pub company: String,
    #[field(default = String::new())]
    pub service: String,
    #[field(name = "projectDetails", default = String::new())]
    pub project_details: String,
    #[field(default = String::new())]
    pub reference: String,
    #[field(name = "g-recaptcha-response")]
    pub recaptcha_token: Option<String>,
}

impl Submission for ServiceRequestForm {
    const COLLECTION: &'static str = "/leads";
    const POLICY: RevertPolicy = RevertPolicy::CONTACT;

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if blank(&self.name) {
            errors.insert("name", "Name is required");
        }
        if blank(&self.email) {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Please enter a valid email");
        }
        if blank(&self.service) {
            errors.insert("service", "Please select a service");
        }
        if blank(&self.project_details) {
            errors.insert("projectDetails", "Please describe your project");
        }
        errors
    }

    fn payload(&self) -> Value {
        let reason = if blank(&self.company) {
            self.project_details.clone()
        } else {
            format!("Company: {}\n\n{}", self.company.trim(), self.project_details)
        };
        json!({
            "name": self.name,
            "phone": or_null(&self.phone),
            "email": self.email,
            "domainOfInterest": self.service,
            "otherDomain": Value::Null,
            "reason": reason,
            "reference": or_null(&self.reference),
            "status": "new",
        })
    }

    fn captcha_token(&self) -> Option<&str> {
        self.recaptcha_token.as_deref()
    }
}

// ═══════════════════════════════════════════════════════════
// Referrer auto-fill
// ═══════════════════════════════════════════════════════════

/// Work out how the visitor found the site.
///
/// `utm_source` wins, then `ref`, then the Referer header's hostname (with a
/// leading `www.` removed) when it is not the site itself.
pub fn detect_reference(
    utm_source: Option<&str>,
    ref_param: Option<&str>,
    referer: Option<&str>,
    own_host: Option<&str>,
) -> Option<String> {
    let present = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);

    if let Some(source) = present(utm_source) {
        return Some(source);
    }
    if let Some(source) = present(ref_param) {
        return Some(source);
    }

    let url = url::Url::parse(referer?.trim()).ok()?;
    let host = url.host_str()?;
    if own_host.map_or(false, |own| own.eq_ignore_ascii_case(host)) {
        return None;
    }
    Some(host.trim_start_matches("www.").to_string())
}
