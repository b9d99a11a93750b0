use rocket::request::{FromRequest, Outcome, Request};

/// The visitor's address, preferring proxy headers over the socket peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

const PROXY_HEADERS: &[&str] = &["CF-Connecting-IP", "True-Client-IP", "X-Real-IP"];

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientIp {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let headers = request.headers();

        for name in PROXY_HEADERS {
            if let Some(ip) = headers.get_one(name).map(str::trim).filter(|ip| !ip.is_empty()) {
                return Outcome::Success(ClientIp(ip.to_string()));
            }
        }

        // X-Forwarded-For: client, proxy1, proxy2
        if let Some(ip) = headers
            .get_one("X-Forwarded-For")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return Outcome::Success(ClientIp(ip.to_string()));
        }

        let ip = request
            .client_ip()
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Outcome::Success(ClientIp(ip))
    }
}

/// Where the visit came from: `utm_source` and `ref` query values plus the
/// `Referer` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    pub utm_source: Option<String>,
    pub ref_param: Option<String>,
    pub referer: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Attribution {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let query = |name: &str| -> Option<String> {
            let value: Option<&str> = request.query_value::<&str>(name).and_then(|v| v.ok());
            non_empty(value)
        };
        Outcome::Success(Attribution {
            utm_source: query("utm_source"),
            ref_param: query("ref"),
            referer: non_empty(request.headers().get_one("Referer")),
        })
    }
}
