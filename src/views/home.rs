use super::contact::{lead_form, ReferencePrefill};
use super::{image, Site};
use crate::forms::submit::FormOutcome;
use crate::forms::LeadForm;
use crate::media;
use crate::models::global::{HomePage, Testimonial};
use crate::models::non_blank;
use crate::navigation::back_link;
use crate::render::html_escape;
use crate::widgets::{marquee_track, Carousel};

pub fn render(site: &Site, lead: &FormOutcome<LeadForm>, prefill: &ReferencePrefill) -> String {
    let default_home = HomePage::default();
    let home = site.home.as_ref().unwrap_or(&default_home);

    let mut html = String::new();
    html.push_str(&hero(site, home));
    html.push_str(&products(site, home));
    html.push_str(&outcomes(home));
    html.push_str(&tech_partners(site, home));
    html.push_str(&trust(site, home));
    html.push_str(&contact(site, lead, prefill));
    html
}

fn hero(site: &Site, home: &HomePage) -> String {
    let slides = media::resolve(home.hero_background_images.as_ref(), &site.media);
    let carousel = Carousel::new(slides.len());

    let slides_html: String = slides
        .iter()
        .enumerate()
        .map(|(i, url)| {
            format!(
                r#"<div class="hero-slide{}" style="background-image:url('{}')"></div>"#,
                if i == carousel.current() { " active" } else { "" },
                html_escape(url)
            )
        })
        .collect();

    let headline = match non_blank(&home.hero_headline) {
        Some(h) => html_escape(h),
        None => r#"Empower Your Data with <span class="text-gradient">Datayaan</span>"#.to_string(),
    };

    let secondary = match (
        non_blank(&home.hero_secondary_button_text),
        non_blank(&home.hero_secondary_button_link),
    ) {
        (Some(text), link) => format!(
            r#"<a href="{}" class="btn btn-ghost">{}</a>"#,
            html_escape(link.unwrap_or("#")),
            html_escape(text)
        ),
        (None, _) => String::new(),
    };

    let background = non_blank(&home.hero_background_color)
        .map(|c| format!(r#" style="background-color:{}""#, html_escape(c)))
        .unwrap_or_default();

    format!(
        r#"<section class="hero"{background} data-carousel data-autoplay="5000">
    <div class="hero-slides">{slides}</div>
    <div class="container hero-content">
        <h1>{headline}</h1>
        <p class="hero-sub">{sub}</p>
        <div class="hero-buttons">
            <a href="{link}" class="btn btn-primary">{text}</a>
            {secondary}
        </div>
    </div>
</section>
"#,
        background = background,
        slides = slides_html,
        headline = headline,
        sub = html_escape(non_blank(&home.hero_subheadline).unwrap_or(
            "Seamlessly manage, analyze, and visualize your data with our enterprise-grade CMS. Built for scalability, security, and performance."
        )),
        link = html_escape(non_blank(&home.hero_button_link).unwrap_or("#")),
        text = html_escape(non_blank(&home.hero_button_text).unwrap_or("Get Started")),
        secondary = secondary,
    )
}

fn products(site: &Site, home: &HomePage) -> String {
    let products = match &home.products {
        Some(p) if !p.is_empty() => p,
        _ => return String::new(),
    };

    let mut tabs = String::new();
    let mut panels = String::new();
    for (i, product) in products.iter().enumerate() {
        let name = product.display_name();
        let icon = media::first(product.icon.as_ref(), &site.media)
            .map(|url| image(&url, &format!("{} icon", name), "product-tab-icon"))
            .unwrap_or_else(|| r#"<span class="product-tab-placeholder">Icon</span>"#.to_string());
        tabs.push_str(&format!(
            r#"<button type="button" class="product-tab{}" data-tab="{}" aria-label="{}">{}</button>"#,
            if i == 0 { " active" } else { "" },
            i,
            html_escape(name),
            icon
        ));

        let images: String = media::resolve(product.image.as_ref(), &site.media)
            .iter()
            .map(|url| image(url, name, "product-slide"))
            .collect();
        let href = back_link::listing_back_link(&format!("/products/{}", product.link_slug()), "home");
        panels.push_str(&format!(
            r#"<div class="product-panel" data-panel="{i}"{hidden}>
    <div class="product-panel-text">
        <h3>{name}</h3>
        <p>{description}</p>
        <a href="{href}" class="btn btn-primary">Learn more about {name}</a>
    </div>
    <div class="product-panel-media" data-carousel data-autoplay="4000">{images}</div>
</div>
"#,
            i = i,
            hidden = if i == 0 { "" } else { " hidden" },
            name = html_escape(name),
            description = html_escape(
                product
                    .short_description
                    .as_deref()
                    .or(product.description.as_deref())
                    .unwrap_or("")
            ),
            href = html_escape(&href),
            images = images,
        ));
    }

    format!(
        r#"<section class="products-section" id="products" data-tabs>
    <div class="container">
        <h2>Our Products</h2>
        <p class="section-sub">Innovative products engineered to deliver measurable impact.</p>
        <div class="product-tabs">{tabs}</div>
        {panels}
    </div>
</section>
"#,
        tabs = tabs,
        panels = panels,
    )
}

fn outcomes(home: &HomePage) -> String {
    let items: String = home
        .stats()
        .iter()
        .map(|stat| {
            format!(
                r#"<div class="stat"><span class="stat-value">{}</span><span class="stat-label">{}</span></div>"#,
                html_escape(&stat.value),
                html_escape(stat.label)
            )
        })
        .collect();
    format!(
        r#"<section class="outcomes-section">
    <div class="container stats-grid">{}</div>
</section>
"#,
        items
    )
}

fn logo_marquee(logos: &[String], alt: &str) -> String {
    marquee_track(logos)
        .into_iter()
        .map(|url| image(url, alt, "marquee-logo"))
        .collect()
}

fn tech_partners(site: &Site, home: &HomePage) -> String {
    let logos = media::resolve(home.tech_partner_logos.as_ref(), &site.media);
    if logos.is_empty() {
        return String::new();
    }
    format!(
        r#"<section class="partners-section">
    <div class="container">
        <h2>Technology &amp; Cloud Partners</h2>
        <div class="marquee"><div class="marquee-track">{}</div></div>
        <div class="marquee marquee-reverse"><div class="marquee-track">{}</div></div>
    </div>
</section>
"#,
        logo_marquee(&logos, "Technology partner"),
        logo_marquee(&logos, "Technology partner"),
    )
}

fn testimonial_card(site: &Site, t: &Testimonial, active: bool) -> String {
    let name = non_blank(&t.customer_name).unwrap_or("");
    let photo = media::first(t.customer_photo.as_ref(), &site.media)
        .map(|url| image(&url, name, "testimonial-photo"))
        .unwrap_or_default();
    let stars = "&#9733;".repeat(t.stars());
    let role = non_blank(&t.role)
        .map(|r| format!(r#"<span class="testimonial-role">{}</span>"#, html_escape(r)))
        .unwrap_or_default();
    format!(
        r#"<figure class="testimonial{active}">
    <blockquote>{review}</blockquote>
    <figcaption>{photo}<strong>{name}</strong>{role}<span class="stars">{stars}</span></figcaption>
</figure>
"#,
        active = if active { " active" } else { "" },
        review = html_escape(non_blank(&t.review).unwrap_or("")),
        photo = photo,
        name = html_escape(name),
        role = role,
        stars = stars,
    )
}

fn trust(site: &Site, home: &HomePage) -> String {
    let logos = media::resolve(home.client_logos.as_ref(), &site.media);
    let testimonials = home.testimonials.as_deref().unwrap_or_default();
    if logos.is_empty() && testimonials.is_empty() {
        return String::new();
    }

    let clients = if logos.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="clients">
    <h3>{}</h3>
    <div class="marquee marquee-vertical"><div class="marquee-track">{}</div></div>
</div>"#,
            html_escape(non_blank(&home.clients_title).unwrap_or("Our Clients")),
            logo_marquee(&logos, "Client logo")
        )
    };

    let reviews = if testimonials.is_empty() {
        String::new()
    } else {
        let carousel = Carousel::new(testimonials.len());
        let cards: String = testimonials
            .iter()
            .enumerate()
            .map(|(i, t)| testimonial_card(site, t, i == carousel.current()))
            .collect();
        let controls = if carousel.has_controls() {
            r#"<div class="carousel-controls"><button type="button" data-prev aria-label="Previous">&lsaquo;</button><button type="button" data-next aria-label="Next">&rsaquo;</button></div>"#
        } else {
            ""
        };
        let subtitle = non_blank(&home.testimonials_subtitle)
            .map(|s| format!("<p>{}</p>", html_escape(s)))
            .unwrap_or_default();
        format!(
            r#"<div class="testimonials" data-carousel>
    <h3>{}</h3>
    {}
    {}
    {}
</div>"#,
            html_escape(non_blank(&home.testimonials_title).unwrap_or("Testimonials")),
            subtitle,
            cards,
            controls
        )
    };

    format!(
        r#"<section class="trust-section">
    <div class="container">
        <h2>What Our Clients Say</h2>
        <div class="trust-grid">{}{}</div>
    </div>
</section>
"#,
        clients, reviews
    )
}

/// Contact band at the foot of the home page: details from the footer copy
/// next to the lead form.
fn contact(site: &Site, lead: &FormOutcome<LeadForm>, prefill: &ReferencePrefill) -> String {
    let footer = &site.layout.footer;
    let mut details = String::new();
    for (label, value, href) in [
        ("Phone", footer.phone.as_deref(), "tel:"),
        ("Email", footer.email.as_deref(), "mailto:"),
    ] {
        if let Some(value) = value {
            details.push_str(&format!(
                r#"<div class="contact-detail"><span>{}</span><a href="{}{}">{}</a></div>"#,
                label,
                href,
                html_escape(value),
                html_escape(value)
            ));
        }
    }
    if let Some(address) = &footer.address {
        details.push_str(&format!(
            r#"<div class="contact-detail"><span>Address</span><p>{}</p></div>"#,
            html_escape(address).replace('\n', "<br>")
        ));
    }
    let social: String = footer
        .social
        .iter()
        .map(|(label, url)| {
            format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                html_escape(url),
                label
            )
        })
        .collect();
    let social = if social.is_empty() {
        social
    } else {
        format!(
            r#"<p>Follow us on social media</p><div class="contact-social">{}</div>"#,
            social
        )
    };

    format!(
        r#"<section class="contact-band" id="contact">
    <div class="container two-column">
        <div class="contact-info">
            <h2>{title}</h2>
            <p>{description}</p>
            {details}
            {social}
        </div>
        <div class="card card-padded">{form}</div>
    </div>
</section>
"#,
        title = html_escape(&footer.title),
        description = html_escape(&footer.description),
        details = details,
        social = social,
        form = lead_form(site, lead, prefill),
    )
}
