use url::form_urlencoded;

/// Builder for CMS REST query strings (`filters`, `populate`, `fields`, `sort`).
///
/// Bracketed keys are written as-is, values are percent-encoded.
#[derive(Debug, Clone)]
pub struct Query {
    resource: String,
    params: Vec<(String, String)>,
    populate_idx: usize,
    fields_idx: usize,
    sort_idx: usize,
}

impl Query {
    pub fn new(resource: &str) -> Self {
        Query {
            resource: resource.trim_start_matches('/').to_string(),
            params: Vec::new(),
            populate_idx: 0,
            fields_idx: 0,
            sort_idx: 0,
        }
    }

    /// `filters[field][$eq]=value`
    pub fn filter_eq(mut self, field: &str, value: &str) -> Self {
        self.params
            .push((format!("filters[{}][$eq]", field), value.to_string()));
        self
    }

    /// `populate=*`
    pub fn populate_all(mut self) -> Self {
        self.params.push(("populate".into(), "*".into()));
        self
    }

    /// `populate[n]=relation`, one entry per relation. Dotted paths are allowed.
    pub fn populate(mut self, relations: &[&str]) -> Self {
        for rel in relations {
            self.params
                .push((format!("populate[{}]", self.populate_idx), rel.to_string()));
            self.populate_idx += 1;
        }
        self
    }

    /// `fields[n]=name`
    pub fn fields(mut self, names: &[&str]) -> Self {
        for name in names {
            self.params
                .push((format!("fields[{}]", self.fields_idx), name.to_string()));
            self.fields_idx += 1;
        }
        self
    }

    /// `sort[n]=field:asc`
    pub fn sort_asc(mut self, field: &str) -> Self {
        self.params
            .push((format!("sort[{}]", self.sort_idx), format!("{}:asc", field)));
        self.sort_idx += 1;
        self
    }

    /// Render as an API path, e.g. `/products?filters[slug][$eq]=fleet`.
    pub fn build(&self) -> String {
        if self.params.is_empty() {
            return format!("/{}", self.resource);
        }
        let query = self
            .params
            .iter()
            .map(|(k, v)| {
                let value: String = form_urlencoded::byte_serialize(v.as_bytes()).collect();
                // `*` and `:` are meaningful to the CMS and safe in a query string
                format!("{}={}", k, value.replace("%2A", "*").replace("%3A", ":"))
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("/{}?{}", self.resource, query)
    }
}
