use crate::error::{ClientError, Result};
use reqwest::Url;
use std::fmt;

/// One of the sub-APIs hosted under a project url.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Rest,
    Auth,
    Storage,
    Functions,
    Realtime,
}

impl Service {
    pub const ALL: [Service; 5] = [
        Service::Rest,
        Service::Auth,
        Service::Storage,
        Service::Functions,
        Service::Realtime,
    ];

    fn path(self) -> &'static str {
        match self {
            Service::Rest => "rest/v1",
            Service::Auth => "auth/v1",
            Service::Storage => "storage/v1",
            Service::Functions => "functions/v1",
            Service::Realtime => "realtime/v1",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::Rest => "rest",
            Service::Auth => "auth",
            Service::Storage => "storage",
            Service::Functions => "functions",
            Service::Realtime => "realtime",
        };
        f.write_str(name)
    }
}

/// Service roots derived from the project url. Computed once per client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base: Url,
    pub rest: Url,
    pub auth: Url,
    pub storage: Url,
    pub functions: Url,
    pub realtime: Url,
}

impl Endpoints {
    pub fn from_base(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ClientError::MissingUrl);
        }

        let base = Url::parse(trimmed).map_err(|e| invalid(trimmed, e.to_string()))?;
        match base.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(trimmed, format!("unsupported scheme {other}"))),
        }
        if base.host_str().map_or(true, str::is_empty) {
            return Err(invalid(trimmed, "missing host".to_string()));
        }
        if base.query().is_some() || base.fragment().is_some() {
            return Err(invalid(trimmed, "query or fragment not allowed".to_string()));
        }

        let root = base.as_str().trim_end_matches('/').to_string();
        let service = |s: Service| {
            Url::parse(&format!("{root}/{}", s.path())).map_err(|e| invalid(trimmed, e.to_string()))
        };

        let mut realtime = service(Service::Realtime)?;
        let ws = if base.scheme() == "https" { "wss" } else { "ws" };
        realtime
            .set_scheme(ws)
            .map_err(|_| invalid(trimmed, format!("cannot switch scheme to {ws}")))?;

        Ok(Endpoints {
            rest: service(Service::Rest)?,
            auth: service(Service::Auth)?,
            storage: service(Service::Storage)?,
            functions: service(Service::Functions)?,
            realtime,
            base,
        })
    }

    pub fn get(&self, service: Service) -> &Url {
        match service {
            Service::Rest => &self.rest,
            Service::Auth => &self.auth,
            Service::Storage => &self.storage,
            Service::Functions => &self.functions,
            Service::Realtime => &self.realtime,
        }
    }

    /// Appends `path` under a service root. A leading `/` is optional.
    pub fn join(&self, service: Service, path: &str) -> Result<Url> {
        let root = self.get(service);
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return Ok(root.clone());
        }
        let joined = format!("{}/{}", root.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| invalid(&joined, e.to_string()))
    }
}

fn invalid(url: &str, reason: String) -> ClientError {
    ClientError::InvalidUrl {
        url: url.to_string(),
        reason,
    }
}
