use super::{back_button, page_hero, Site};
use crate::forms::submit::FormOutcome;
use crate::forms::{
    DemoBookingForm, FieldErrors, FormStatus, LeadForm, ServiceRequestForm, Submission,
    OTHER_DOMAIN, REFERENCE_OPTIONS,
};
use crate::models::company::{domain_names, Office};
use crate::models::pages::ContactPage;
use crate::models::service::Service;
use crate::navigation::back_link::BackParams;
use crate::render::html_escape;
use crate::security::recaptcha;

const ERROR_BANNER: &str = "Something went wrong. Please try again.";

/// Pre-filled "how did you hear about us" value. A detected source locks the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferencePrefill {
    pub value: Option<String>,
}

impl ReferencePrefill {
    pub fn locked(&self) -> bool {
        self.value.is_some()
    }
}

// ── Field helpers ──────────────────────────────────────

fn error_text(errors: &FieldErrors, field: &str) -> String {
    errors
        .get(field)
        .map(|msg| format!(r#"<p class="field-error">{}</p>"#, html_escape(msg)))
        .unwrap_or_default()
}

struct Field<'a> {
    kind: &'a str,
    name: &'a str,
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    required: bool,
}

fn input(field: Field<'_>, errors: &FieldErrors) -> String {
    let invalid = if errors.has(field.name) { " invalid" } else { "" };
    format!(
        r#"<div class="form-group{invalid}">
    <label for="f-{name}">{label}{star}</label>
    <input type="{kind}" id="f-{name}" name="{name}" value="{value}" placeholder="{placeholder}"{required}>
    {error}
</div>"#,
        invalid = invalid,
        name = field.name,
        label = html_escape(field.label),
        star = if field.required { r#"<span class="required">*</span>"# } else { "" },
        kind = field.kind,
        value = html_escape(field.value),
        placeholder = html_escape(field.placeholder),
        required = if field.required { " required" } else { "" },
        error = error_text(errors, field.name),
    )
}

fn textarea(name: &str, label: &str, value: &str, placeholder: &str, required: bool, errors: &FieldErrors) -> String {
    format!(
        r#"<div class="form-group{invalid}">
    <label for="f-{name}">{label}{star}</label>
    <textarea id="f-{name}" name="{name}" rows="4" placeholder="{placeholder}"{required}>{value}</textarea>
    {error}
</div>"#,
        invalid = if errors.has(name) { " invalid" } else { "" },
        name = name,
        label = html_escape(label),
        star = if required { r#"<span class="required">*</span>"# } else { "" },
        placeholder = html_escape(placeholder),
        required = if required { " required" } else { "" },
        value = html_escape(value),
        error = error_text(errors, name),
    )
}

fn select(
    name: &str,
    label: &str,
    prompt: &str,
    options: &[String],
    selected: &str,
    required: bool,
    errors: &FieldErrors,
) -> String {
    let mut opts = format!(r#"<option value="">{}</option>"#, html_escape(prompt));
    for option in options {
        opts.push_str(&format!(
            r#"<option value="{value}"{sel}>{value}</option>"#,
            value = html_escape(option),
            sel = if option == selected { " selected" } else { "" }
        ));
    }
    format!(
        r#"<div class="form-group{invalid}">
    <label for="f-{name}">{label}{star}</label>
    <select id="f-{name}" name="{name}"{required}>{opts}</select>
    {error}
</div>"#,
        invalid = if errors.has(name) { " invalid" } else { "" },
        name = name,
        label = html_escape(label),
        star = if required { r#"<span class="required">*</span>"# } else { "" },
        required = if required { " required" } else { "" },
        opts = opts,
        error = error_text(errors, name),
    )
}

/// Free-text reference field, read-only when the source was detected.
fn reference_input(value: &str, prefill: &ReferencePrefill, placeholder: &str) -> String {
    let value = prefill.value.as_deref().unwrap_or(value);
    format!(
        r#"<div class="form-group">
    <label for="f-reference">How did you hear about us? (Optional)</label>
    <input type="text" id="f-reference" name="reference" value="{}" placeholder="{}"{}>
</div>"#,
        html_escape(value),
        html_escape(placeholder),
        if prefill.locked() { r#" readonly class="locked""# } else { "" }
    )
}

fn captcha(site: &Site, errors: &FieldErrors) -> String {
    let widget = recaptcha::widget(site.layout.captcha_site_key.as_deref());
    if widget.is_empty() {
        return String::new();
    }
    format!(
        r#"<div class="form-group captcha">{}{}</div>"#,
        widget,
        error_text(errors, "recaptcha")
    )
}

/// Success / error banner. Auto-reverting variants carry their delay for `site.js`.
fn status_banner<F: Submission>(outcome: &FormOutcome<F>, success: &str) -> String {
    let revert = outcome
        .machine
        .revert_after_ms()
        .map(|ms| format!(r#" data-revert-after="{}""#, ms))
        .unwrap_or_default();
    match outcome.status() {
        FormStatus::Success => format!(
            r#"<div class="form-banner form-banner-success" role="status"{}>{}</div>"#,
            revert,
            html_escape(success)
        ),
        FormStatus::Error => format!(
            r#"<div class="form-banner form-banner-error" role="alert"{}>{}</div>"#,
            revert, ERROR_BANNER
        ),
        _ => String::new(),
    }
}

fn contact_row(errors: &FieldErrors) -> String {
    error_text(errors, "contact")
}

// ── Lead form ──────────────────────────────────────────

/// The general enquiry form. Posts to `/contact`.
pub fn lead_form(site: &Site, outcome: &FormOutcome<LeadForm>, prefill: &ReferencePrefill) -> String {
    let v = &outcome.values;
    let e = &outcome.errors;

    let mut subjects = domain_names(&site.domains);
    subjects.push(OTHER_DOMAIN.to_string());
    let radios: String = subjects
        .iter()
        .map(|subject| {
            format!(
                r#"<label class="radio"><input type="radio" name="domainOfInterest" value="{value}"{checked}> {value}</label>"#,
                value = html_escape(subject),
                checked = if *subject == v.domain_of_interest { " checked" } else { "" }
            )
        })
        .collect();

    let other_hidden = if v.domain_of_interest == OTHER_DOMAIN { "" } else { " hidden" };

    format!(
        r#"<form method="post" action="/contact" class="lead-form" novalidate>
    {banner}
    {name}
    <div class="form-row">
        {email}
        {phone}
    </div>
    {contact}
    <div class="form-group">
        <label>Select Subject?</label>
        <div class="radio-group" data-other-toggle="otherDomain">{radios}</div>
    </div>
    <div class="form-group{other_invalid}" data-other-field{other_hidden}>
        <label for="f-otherDomain">Specify Domain<span class="required">*</span></label>
        <input type="text" id="f-otherDomain" name="otherDomain" value="{other_value}" placeholder="Enter your domain">
        {other_error}
    </div>
    {reason}
    {reference}
    {captcha}
    <button type="submit" class="btn btn-primary" data-submitting-text="Sending...">Send Message</button>
</form>"#,
        banner = status_banner(outcome, "Thank you! We'll get back to you soon."),
        name = input(
            Field { kind: "text", name: "name", label: "Name", value: &v.name, placeholder: "Your name", required: true },
            e
        ),
        email = input(
            Field { kind: "email", name: "email", label: "Email", value: &v.email, placeholder: "you@example.com", required: false },
            e
        ),
        phone = input(
            Field { kind: "tel", name: "phone", label: "Phone", value: &v.phone, placeholder: "+1 (555) 000-0000", required: false },
            e
        ),
        contact = contact_row(e),
        radios = radios,
        other_invalid = if e.has("otherDomain") { " invalid" } else { "" },
        other_hidden = other_hidden,
        other_value = html_escape(&v.other_domain),
        other_error = error_text(e, "otherDomain"),
        reason = textarea("reason", "Reason for Contact", &v.reason, "Write your message...", true, e),
        reference = reference_input(&v.reference, prefill, "Google, LinkedIn, etc."),
        captcha = captcha(site, e),
    )
}

// ── Pages ──────────────────────────────────────────────

pub fn render_contact(
    site: &Site,
    page: Option<&ContactPage>,
    offices: &[Office],
    outcome: &FormOutcome<LeadForm>,
    prefill: &ReferencePrefill,
    back: &BackParams,
) -> String {
    let copy = ContactPage::copy(page);

    let offices_html = if offices.is_empty() {
        String::new()
    } else {
        let cards: String = offices
            .iter()
            .map(|office| {
                let mut lines = format!(
                    r#"<h3>{}</h3><p class="office-country">{}</p><p>{}</p>"#,
                    html_escape(&office.city),
                    html_escape(&office.country),
                    html_escape(&office.address).replace('\n', "<br>")
                );
                if let Some(phone) = office.phone.as_deref().filter(|p| !p.trim().is_empty()) {
                    lines.push_str(&format!(
                        r#"<a href="tel:{0}">{0}</a>"#,
                        html_escape(phone)
                    ));
                }
                if let Some(email) = office.email.as_deref().filter(|m| !m.trim().is_empty()) {
                    lines.push_str(&format!(
                        r#"<a href="mailto:{0}">{0}</a>"#,
                        html_escape(email)
                    ));
                }
                format!(r#"<div class="card card-padded office">{}</div>"#, lines)
            })
            .collect();
        format!(
            r#"<section class="locations-section">
    <div class="container">
        <div class="section-head centered">
            <h2>{}</h2>
            <p class="section-sub">{}</p>
        </div>
        <div class="card-grid">{}</div>
    </div>
</section>"#,
            html_escape(&copy.locations_heading),
            html_escape(&copy.locations_description),
            cards
        )
    };

    format!(
        r#"{hero}
<section class="contact-section">
    <div class="container narrow">
        <div class="section-head centered">
            <h2>{form_heading}</h2>
            <p class="section-sub">{form_description}</p>
        </div>
        <div class="contact-options">
            <a href="/request-services?from=contact" class="card card-padded contact-option">
                <h3>Request for Services</h3>
                <p>Get in touch about our services</p>
            </a>
            <a href="/book-demo?from=contact" class="card card-padded contact-option">
                <h3>Product Information</h3>
                <p>Schedule a product demo</p>
            </a>
        </div>
        <div class="card card-padded" id="contact">{form}</div>
    </div>
</section>
{offices}
"#,
        hero = page_hero(&copy.page_title, Some(&copy.page_subtitle), Some(&back_button(back)), None),
        form_heading = html_escape(&copy.form_heading),
        form_description = html_escape(&copy.form_description),
        form = lead_form(site, outcome, prefill),
        offices = offices_html,
    )
}

pub fn render_book_demo(
    site: &Site,
    outcome: &FormOutcome<DemoBookingForm>,
    prefill: &ReferencePrefill,
    back: &BackParams,
) -> String {
    let hero = page_hero(
        "Book a Personalized Demo",
        Some("Fill out the form below to get a walkthrough of our solutions. See how we can help you achieve your business goals."),
        Some(&back_button(back)),
        None,
    );

    if outcome.status() == FormStatus::Success {
        return format!(
            r#"{hero}
<section class="form-card-section">
    <div class="container narrow">
        <div class="form-success">
            <span class="form-success-icon">&#10003;</span>
            <h3>Demo Scheduled!</h3>
            <p>Your demo request has been received. Our team will contact you shortly to confirm the time.</p>
            <a href="/book-demo" class="btn btn-ghost">Book another demo</a>
        </div>
    </div>
</section>
"#,
            hero = hero
        );
    }

    let v = &outcome.values;
    let e = &outcome.errors;
    let products: Vec<String> = site
        .products
        .iter()
        .map(|p| p.name.clone())
        .filter(|n| !n.trim().is_empty())
        .collect();
    let references: Vec<String> = REFERENCE_OPTIONS.iter().map(|s| s.to_string()).collect();

    // A detected source is carried as a fixed value instead of the dropdown.
    let reference = match &prefill.value {
        Some(source) => format!(
            r#"<div class="form-group">
    <label for="f-reference">How did you hear about us?</label>
    <input type="text" id="f-reference" name="reference" value="{}" readonly class="locked">
</div>"#,
            html_escape(source)
        ),
        None => {
            let mut html = select(
                "reference",
                "How did you hear about us?",
                "Select an option",
                &references,
                &v.reference,
                false,
                e,
            );
            html.push_str(&format!(
                r#"<div class="form-group{invalid}" data-other-field{hidden}>
    <label for="f-referenceOther">Please specify</label>
    <input type="text" id="f-referenceOther" name="referenceOther" value="{value}">
    {error}
</div>"#,
                invalid = if e.has("referenceOther") { " invalid" } else { "" },
                hidden = if v.reference == "Other" { "" } else { " hidden" },
                value = html_escape(&v.reference_other),
                error = error_text(e, "referenceOther"),
            ));
            html
        }
    };

    let error_banner = if outcome.status() == FormStatus::Error {
        format!(r#"<div class="form-banner form-banner-error" role="alert">{}</div>"#, ERROR_BANNER)
    } else {
        String::new()
    };

    format!(
        r#"{hero}
<section class="form-card-section">
    <div class="container narrow">
        <form method="post" action="/book-demo" class="card card-padded demo-form" novalidate>
            <div class="form-row">{first}{last}</div>
            <div class="form-row">{email}{company}</div>
            {product}
            {phone}
            {date}
            {reference}
            {notes}
            {captcha}
            {error_banner}
            <button type="submit" class="btn btn-primary btn-block" data-submitting-text="Scheduling...">Schedule Demo</button>
        </form>
    </div>
</section>
"#,
        hero = hero,
        first = input(
            Field { kind: "text", name: "firstName", label: "First name", value: &v.first_name, placeholder: "John", required: true },
            e
        ),
        last = input(
            Field { kind: "text", name: "lastName", label: "Last name", value: &v.last_name, placeholder: "Doe", required: true },
            e
        ),
        email = input(
            Field { kind: "email", name: "email", label: "Work email", value: &v.email, placeholder: "john@company.com", required: true },
            e
        ),
        company = input(
            Field { kind: "text", name: "company", label: "Company name", value: &v.company, placeholder: "Company Inc.", required: true },
            e
        ),
        product = select("product", "Product of interest", "Select a product", &products, &v.product, true, e),
        phone = input(
            Field { kind: "tel", name: "phone", label: "Phone Number", value: &v.phone, placeholder: "+1 (555) 000-0000", required: false },
            e
        ),
        date = input(
            Field { kind: "date", name: "preferredDate", label: "Preferred Date", value: &v.preferred_date, placeholder: "", required: false },
            e
        ),
        reference = reference,
        notes = textarea(
            "notes",
            "Additional Notes",
            &v.notes,
            "Any specific features or use cases you'd like to discuss...",
            false,
            e
        ),
        captcha = captcha(site, e),
        error_banner = error_banner,
    )
}

pub fn render_request_services(
    site: &Site,
    services: &[Service],
    outcome: &FormOutcome<ServiceRequestForm>,
    prefill: &ReferencePrefill,
    back: &BackParams,
) -> String {
    let v = &outcome.values;
    let e = &outcome.errors;
    let names: Vec<String> = services
        .iter()
        .map(|s| s.title.clone())
        .filter(|t| !t.trim().is_empty())
        .collect();

    format!(
        r#"{hero}
<section class="form-card-section">
    <div class="container narrow">
        <form method="post" action="/request-services" class="card card-padded service-form" novalidate>
            {banner}
            <div class="form-row">{name}{email}</div>
            <div class="form-row">{phone}{company}</div>
            {service}
            {details}
            {reference}
            {captcha}
            <button type="submit" class="btn btn-primary btn-block" data-submitting-text="Submitting...">Submit Request</button>
        </form>
    </div>
</section>
"#,
        hero = page_hero(
            "Request for Services",
            Some("Tell us about your project needs and we'll get back to you with a customized solution."),
            Some(&back_button(back)),
            None,
        ),
        banner = status_banner(outcome, "Thank you! Your request has been received. We'll get back to you soon."),
        name = input(
            Field { kind: "text", name: "name", label: "Full name", value: &v.name, placeholder: "Your name", required: true },
            e
        ),
        email = input(
            Field { kind: "email", name: "email", label: "Email", value: &v.email, placeholder: "you@company.com", required: true },
            e
        ),
        phone = input(
            Field { kind: "tel", name: "phone", label: "Phone", value: &v.phone, placeholder: "+1 (555) 000-0000", required: false },
            e
        ),
        company = input(
            Field { kind: "text", name: "company", label: "Company", value: &v.company, placeholder: "Company Inc.", required: false },
            e
        ),
        service = select("service", "Service required", "Select a service", &names, &v.service, true, e),
        details = textarea(
            "projectDetails",
            "Project details",
            &v.project_details,
            "Tell us about your goals, timeline and budget...",
            true,
            e
        ),
        reference = reference_input(&v.reference, prefill, "Google, LinkedIn, etc."),
        captcha = captcha(site, e),
    )
}
