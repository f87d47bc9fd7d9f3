use super::error::{Error, Result};
use crate::config::DEFAULT_VERIFY_ROUTE;
use url::{ParseError, Url};

const UIDB64_PLACEHOLDER: &str = "{uidb64}";
const TOKEN_PLACEHOLDER: &str = "{token}";

/// The bits of the incoming request required to build absolute links back
/// into the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    base_url: Url,
}

impl TryFrom<&str> for RequestContext {
    type Error = ParseError;

    /// Builds the context out of an absolute base url, like `https://jobs.example.com`.
    fn try_from(base_url: &str) -> std::result::Result<Self, ParseError> {
        Url::parse(base_url).map(|base_url| Self { base_url })
    }
}

impl RequestContext {
    pub fn new(scheme: &str, host: &str) -> std::result::Result<Self, ParseError> {
        format!("{scheme}://{host}/").as_str().try_into()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves the given path against the base url of the request.
    pub fn absolute_url(&self, path: &str) -> std::result::Result<Url, ParseError> {
        self.base_url.join(path)
    }
}

/// The named route verification links point to, holding a `{uidb64}` and a
/// `{token}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyRoute(String);

impl Default for VerifyRoute {
    fn default() -> Self {
        Self(DEFAULT_VERIFY_ROUTE.to_string())
    }
}

impl TryFrom<&str> for VerifyRoute {
    type Error = Error;

    /// Builds a [VerifyRoute] if, and only if, the pattern holds both placeholders.
    fn try_from(pattern: &str) -> Result<Self> {
        if !pattern.contains(UIDB64_PLACEHOLDER) || !pattern.contains(TOKEN_PLACEHOLDER) {
            error!(pattern, "verification route misses a placeholder");
            return Error::NotARoute.into();
        }

        Ok(Self(pattern.to_string()))
    }
}

impl VerifyRoute {
    /// Returns the path of the route with both placeholders substituted.
    pub fn reverse(&self, uidb64: &str, token: &str) -> String {
        self.0
            .replace(UIDB64_PLACEHOLDER, uidb64)
            .replace(TOKEN_PLACEHOLDER, token)
    }
}

#[cfg(test)]
mod tests {
    use super::{RequestContext, VerifyRoute};
    use crate::verification::error::Error;

    #[test]
    fn request_context_from_scheme_and_host() {
        struct Test<'a> {
            name: &'a str,
            scheme: &'a str,
            host: &'a str,
            base_url: Option<&'a str>,
        }

        vec![
            Test {
                name: "https host",
                scheme: "https",
                host: "jobs.example.com",
                base_url: Some("https://jobs.example.com/"),
            },
            Test {
                name: "host with port",
                scheme: "http",
                host: "localhost:8000",
                base_url: Some("http://localhost:8000/"),
            },
            Test {
                name: "empty host",
                scheme: "http",
                host: "",
                base_url: None,
            },
            Test {
                name: "host with spaces",
                scheme: "http",
                host: "not a host",
                base_url: None,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let context = RequestContext::new(test.scheme, test.host);
            assert_eq!(
                context.ok().map(|context| context.base_url().to_string()),
                test.base_url.map(str::to_string),
                "{}",
                test.name
            );
        })
    }

    #[test]
    fn absolute_url_replaces_base_path() {
        let context = RequestContext::try_from("https://jobs.example.com/api/").unwrap();
        let url = context.absolute_url("/employer/verify-email/abc/def/").unwrap();
        assert_eq!(
            url.as_str(),
            "https://jobs.example.com/employer/verify-email/abc/def/"
        );
    }

    #[test]
    fn reverse_route() {
        struct Test<'a> {
            name: &'a str,
            route: VerifyRoute,
            output: &'a str,
        }

        vec![
            Test {
                name: "default route",
                route: VerifyRoute::default(),
                output: "/employer/verify-email/dWlk/t0k-3n/",
            },
            Test {
                name: "custom route",
                route: VerifyRoute::try_from("/verify/{token}/{uidb64}").unwrap(),
                output: "/verify/t0k-3n/dWlk",
            },
        ]
        .into_iter()
        .for_each(|test| {
            assert_eq!(
                test.route.reverse("dWlk", "t0k-3n"),
                test.output,
                "{}",
                test.name
            );
        })
    }

    #[test]
    fn route_from_str() {
        struct Test<'a> {
            name: &'a str,
            pattern: &'a str,
            is_valid: bool,
        }

        vec![
            Test {
                name: "both placeholders",
                pattern: "/employer/verify-email/{uidb64}/{token}/",
                is_valid: true,
            },
            Test {
                name: "route without placeholders",
                pattern: "/verify/",
                is_valid: false,
            },
            Test {
                name: "misspelled placeholders",
                pattern: "/employer/verify-email/{uid}/{tok}/",
                is_valid: false,
            },
            Test {
                name: "missing token placeholder",
                pattern: "/employer/verify-email/{uidb64}/",
                is_valid: false,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let result = VerifyRoute::try_from(test.pattern);
            if test.is_valid {
                assert!(result.is_ok(), "{}", test.name);
            } else {
                assert!(
                    matches!(result, Err(Error::NotARoute)),
                    "{}",
                    test.name
                );
            }
        })
    }
}
